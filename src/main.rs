//! Dental Desk - front desk for a dental clinic.

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use dental_desk as app;

use app::config::{AppConfig, AudioBackend, ConfigLoadResult};
use app::ui::App;

/// Front desk for a dental clinic: patient calls, waiting-room display, inventory.
#[derive(Parser)]
#[command(name = "dental-desk")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Explicit config file path
    #[arg(long, value_name = "PATH", conflicts_with = "dev")]
    config: Option<PathBuf>,

    /// Disable the call chime regardless of config
    #[arg(long)]
    silent: bool,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from("config.toml"),
        (None, false) => AppConfig::default_path(),
    };

    let mut first_run = false;
    let (mut config, config_warning) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, None),
        ConfigLoadResult::Missing => {
            first_run = true;
            match AppConfig::create_default(&config_path) {
                Ok(config) => (config, None),
                Err(e) => (AppConfig::default(), Some(format!("could not write default config: {e}"))),
            }
        }
        ConfigLoadResult::Invalid(e) => (AppConfig::default(), Some(e.to_string())),
    };

    if cli.silent {
        config.audio.backend = AudioBackend::Silent;
    }

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&config);

    tracing::info!("Dental Desk starting...");
    tracing::info!("Config path: {:?}", config_path);
    if first_run && config_warning.is_none() {
        tracing::info!("No config found, wrote defaults");
    }
    match &config_warning {
        Some(e) => tracing::warn!("Config problem, using defaults: {}", e),
        None => tracing::info!(
            "Call expiry {}s, audio backend {:?}",
            config.waiting_room.expiry_secs,
            config.audio.backend
        ),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Dental Desk")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    // Create tokio runtime for the waiting-room timers
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    eframe::run_native(
        "Dental Desk",
        options,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(App::new(config, rt, config_warning)))
        }),
    )
}

/// Initialize stdout logging, plus a daily rolling file when enabled.
fn init_logging(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    if !config.logging.file_enabled {
        tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
        return None;
    }

    let appender = tracing_appender::rolling::daily(AppConfig::log_dir(), "dental-desk.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();

    Some(guard)
}
