//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub waiting_room: WaitingRoomConfig,
    pub audio: AudioConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Waiting-room call display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitingRoomConfig {
    /// Seconds a call stays on the display (default: 45).
    pub expiry_secs: u64,
    /// Delay before the reinforcement chime in milliseconds (default: 2000).
    pub reinforce_delay_ms: u64,
}

/// Audio backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioBackend {
    /// Synthesize the chime tones and play them through `aplay`.
    #[default]
    Synth,
    /// Ring the terminal bell once per chime.
    Bell,
    /// Log the chime and stay quiet.
    Silent,
}

/// Alert sound settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub backend: AudioBackend,
    /// Master volume applied to every tone, 0.0 to 1.0.
    pub volume: f32,
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Panel shown right after login, if the role may open it.
    pub start_panel: String,
}

/// Log output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write a daily rolling log file to the data directory.
    pub file_enabled: bool,
}

impl AppConfig {
    /// Get config file path.
    ///
    /// Uses the platform config directory, falling back to the executable's directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("ma", "clinic", "dental-desk")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            })
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Directory for rolling log files.
    pub fn log_dir() -> PathBuf {
        directories::ProjectDirs::from("ma", "clinic", "dental-desk")
            .map(|dirs| dirs.data_local_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => ConfigLoadResult::Loaded(config),
                Err(e) => ConfigLoadResult::Invalid(e),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Parse and validate config file content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<AppConfig>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waiting_room.expiry_secs == 0 {
            return Err(ConfigError::Validation(
                "Call expiry must be at least 1 second".to_string(),
            ));
        }
        if self.waiting_room.expiry_secs > 600 {
            return Err(ConfigError::Validation(
                "Call expiry cannot exceed 600 seconds".to_string(),
            ));
        }
        if self.waiting_room.reinforce_delay_ms >= self.waiting_room.expiry_secs * 1000 {
            return Err(ConfigError::Validation(
                "Reinforcement chime must play before the call expires".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::Validation("Volume must be between 0.0 and 1.0".to_string()));
        }
        Ok(())
    }

    /// Write a default config to `path` so it can be edited after first run.
    pub fn create_default(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl WaitingRoomConfig {
    pub fn expiry_delay(&self) -> Duration {
        Duration::from_secs(self.expiry_secs)
    }

    pub fn reinforce_delay(&self) -> Duration {
        Duration::from_millis(self.reinforce_delay_ms)
    }
}

impl Default for WaitingRoomConfig {
    fn default() -> Self {
        Self {
            expiry_secs: 45,
            reinforce_delay_ms: 2000,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: AudioBackend::default(),
            volume: 1.0,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_panel: "dashboard".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.waiting_room.expiry_delay(), Duration::from_secs(45));
        assert_eq!(config.waiting_room.reinforce_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_parse_partial_file_uses_defaults() {
        let config = AppConfig::parse(
            r#"
            [waiting_room]
            expiry_secs = 30

            [audio]
            backend = "silent"
            "#,
        )
        .unwrap();

        assert_eq!(config.waiting_room.expiry_secs, 30);
        assert_eq!(config.waiting_room.reinforce_delay_ms, 2000);
        assert_eq!(config.audio.backend, AudioBackend::Silent);
        assert!(config.audio.enabled);
        assert_eq!(config.ui.start_panel, "dashboard");
    }

    #[test]
    fn test_parse_rejects_unknown_backend() {
        let result = AppConfig::parse("[audio]\nbackend = \"speaker\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_expiry_bounds() {
        let mut config = AppConfig::default();

        config.waiting_room.expiry_secs = 0;
        assert!(config.validate().is_err());

        config.waiting_room.expiry_secs = 601;
        assert!(config.validate().is_err());

        config.waiting_room.expiry_secs = 30;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_reinforce_after_expiry() {
        let mut config = AppConfig::default();
        config.waiting_room.expiry_secs = 2;
        config.waiting_room.reinforce_delay_ms = 2000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_volume_range() {
        let mut config = AppConfig::default();
        config.audio.volume = 1.5;
        assert!(config.validate().is_err());

        config.audio.volume = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_try_load_missing_file() {
        let path = std::env::temp_dir().join("dental-desk-does-not-exist/config.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));
    }

    #[test]
    fn test_create_default_on_first_run() {
        let dir = std::env::temp_dir().join(format!("dental-desk-test-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested/config.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));

        let created = AppConfig::create_default(&path).unwrap();
        assert_eq!(created.audio.backend, AudioBackend::Synth);

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => {
                assert_eq!(loaded.waiting_room.expiry_secs, 45);
                assert_eq!(loaded.audio.backend, AudioBackend::Synth);
            }
            other => panic!("unexpected load result: {other:?}"),
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("dental-desk-test-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let mut config = AppConfig::default();
        config.waiting_room.expiry_secs = 60;
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => assert_eq!(loaded.waiting_room.expiry_secs, 60),
            other => panic!("unexpected load result: {other:?}"),
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
