//! Main application state and window layout.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout, RichText};

use crate::auth::{Section, Session};
use crate::config::AppConfig;
use crate::inventory::StockFilter;
use crate::mock;
use crate::models::{Doctor, Medicine, Patient};
use crate::waiting_room::{NotifierSettings, WaitingRoom, WaitingRoomSnapshot, sounder_for};

use super::components::colors;
use super::{call_panel, dashboard, inventory_panel, login, waiting_room_display};

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Login form state.
#[derive(Default, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

/// "Call next patient" form state.
#[derive(Default, Clone)]
pub struct CallForm {
    pub doctor_id: String,
    pub cabinet_number: String,
    pub error: Option<String>,
}

/// Main application state.
pub struct App {
    // Runtime driving the notifier timers
    pub rt: tokio::runtime::Runtime,

    pub config: AppConfig,
    pub config_warning: Option<String>,

    pub session: Session,
    pub waiting_room: WaitingRoom,

    // Navigation
    pub current_section: Section,

    // Mock data
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub medicines: Vec<Medicine>,
    /// When each patient was last called, by patient id.
    pub called_at: HashMap<String, DateTime<Local>>,

    // Forms
    pub login_form: LoginForm,
    pub call_form: CallForm,
    pub inventory_search: String,
    pub inventory_filter: StockFilter,

    // Log messages
    pub log_messages: Vec<LogEntry>,
}

impl App {
    pub fn new(config: AppConfig, rt: tokio::runtime::Runtime, config_warning: Option<String>) -> Self {
        let waiting_room = WaitingRoom::new(
            NotifierSettings::from_config(&config),
            sounder_for(&config.audio),
            rt.handle().clone(),
        );

        let doctors = mock::doctors();
        let call_form = doctors
            .first()
            .map(|d| CallForm {
                doctor_id: d.id.clone(),
                cabinet_number: d.cabinet_number.clone(),
                error: None,
            })
            .unwrap_or_default();

        Self {
            rt,
            config,
            config_warning,
            session: Session::default(),
            waiting_room,
            current_section: Section::Dashboard,
            patients: mock::patients(),
            doctors,
            medicines: mock::medicines(),
            called_at: HashMap::new(),
            login_form: LoginForm::default(),
            call_form,
            inventory_search: String::new(),
            inventory_filter: StockFilter::default(),
            log_messages: Vec::new(),
        }
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Submit the login form.
    pub fn login(&mut self) {
        let username = self.login_form.username.clone();
        match self.session.login(&username, &self.login_form.password) {
            Ok(user) => {
                let greeting = format!("Welcome, {}", user.full_name());
                self.login_form = LoginForm::default();
                self.current_section = self.start_section();
                self.log_info(greeting);
            }
            Err(e) => {
                self.login_form.password.clear();
                self.login_form.error = Some(e.to_string());
            }
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.current_section = Section::Dashboard;
    }

    /// Section from config if the user may open it, else the dashboard.
    fn start_section(&self) -> Section {
        Section::from_key(&self.config.ui.start_panel)
            .filter(|s| self.session.has_access(*s))
            .unwrap_or(Section::Dashboard)
    }

    /// Switch section, ignoring sections the role may not open.
    pub fn navigate(&mut self, section: Section) {
        if self.session.has_access(section) {
            self.current_section = section;
        } else {
            tracing::warn!("Navigation to {} refused for current role", section.name());
            self.log_warning(format!("{} is not available for your role", section.name()));
        }
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == self.call_form.doctor_id)
    }

    /// Select the calling doctor and default the cabinet to theirs.
    pub fn select_doctor(&mut self, doctor_id: &str) {
        if let Some(doctor) = self.doctors.iter().find(|d| d.id == doctor_id) {
            self.call_form.doctor_id = doctor.id.clone();
            self.call_form.cabinet_number = doctor.cabinet_number.clone();
            self.call_form.error = None;
        }
    }

    /// Announce a waiting patient with the selected doctor and cabinet.
    pub fn call_patient(&mut self, patient_id: &str) {
        let Some(patient) = self.patients.iter().find(|p| p.id == patient_id).cloned() else {
            self.call_form.error = Some(format!("Unknown patient {patient_id}"));
            return;
        };
        let Some(doctor) = self.selected_doctor().cloned() else {
            self.call_form.error = Some("Select a doctor first".to_string());
            return;
        };

        match self
            .waiting_room
            .call_next_patient(patient, doctor, &self.call_form.cabinet_number)
        {
            Ok(call) => {
                self.call_form.error = None;
                self.called_at.insert(call.patient.id.clone(), call.timestamp);
                self.log_success(call.announcement());
            }
            Err(e) => {
                self.log_error(format!("Call failed: {e}"));
                self.call_form.error = Some(e.to_string());
            }
        }
    }

    /// Number of distinct patients called today.
    pub fn calls_today(&self) -> usize {
        let today = Local::now().date_naive();
        self.called_at.values().filter(|t| t.date_naive() == today).count()
    }

    /// Render the sidebar with the role's sections.
    fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(220.0)
            .show(ctx, |ui| {
                ui.add_space(15.0);
                ui.label(RichText::new("Dental Clinic").size(20.0).strong());
                ui.label(RichText::new("Front desk").small().weak());
                ui.add_space(10.0);
                ui.separator();

                if let Some(user) = self.session.user() {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(user.initials()).strong().color(colors::SUCCESS));
                        ui.vertical(|ui| {
                            ui.label(user.full_name());
                            ui.label(RichText::new(user.role.name()).small().weak());
                        });
                    });
                    ui.separator();
                }

                ui.add_space(5.0);
                let mut next = None;
                for section in self.session.visible_sections() {
                    let text = format!("{}  {}", section_icon(section), section.name());
                    if ui
                        .selectable_label(self.current_section == section, text)
                        .clicked()
                    {
                        next = Some(section);
                    }
                }
                if let Some(section) = next {
                    self.navigate(section);
                }

                ui.with_layout(Layout::bottom_up(Align::Min), |ui| {
                    ui.add_space(10.0);
                    if ui
                        .button(format!("{}  Log out", egui_phosphor::regular::SIGN_OUT))
                        .clicked()
                    {
                        self.logout();
                    }
                });
            });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context, snapshot: &WaitingRoomSnapshot) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    match (&snapshot.current, snapshot.remaining) {
                        (Some(call), Some(remaining)) => {
                            ui.colored_label(
                                colors::ACCENT,
                                format!(
                                    "{} Now calling: {} - cabinet {} ({}s)",
                                    egui_phosphor::regular::MEGAPHONE,
                                    call.patient.full_name(),
                                    call.cabinet_number,
                                    remaining.as_secs()
                                ),
                            );
                        }
                        _ => {
                            ui.colored_label(colors::NEUTRAL, "No active call");
                        }
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(warning) = &self.config_warning {
                            ui.colored_label(colors::WARNING, format!("Config: {warning}"));
                        }
                    });
                });
            });
    }
}

fn section_icon(section: Section) -> &'static str {
    use egui_phosphor::regular as icon;
    match section {
        Section::Dashboard => icon::HOUSE,
        Section::Patients => icon::USERS,
        Section::Appointments => icon::CALENDAR,
        Section::MedicalFiles => icon::FILE_TEXT,
        Section::Prescriptions => icon::PILL,
        Section::LabResults => icon::TEST_TUBE,
        Section::Radiology => icon::CAMERA,
        Section::Billing => icon::CURRENCY_DOLLAR,
        Section::Inventory => icon::PACKAGE,
        Section::Staff => icon::USER_CHECK,
        Section::Messages => icon::CHAT_CIRCLE,
        Section::Statistics => icon::CHART_BAR,
        Section::WaitingRoom => icon::MONITOR,
        Section::Settings => icon::GEAR,
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.session.is_authenticated() {
            login::show(self, ctx);
            return;
        }

        let snapshot = self.waiting_room.snapshot();

        // Keep the countdown moving and pick up the expiry
        if snapshot.current.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        self.show_sidebar(ctx);
        self.show_status_bar(ctx, &snapshot);

        egui::CentralPanel::default().show(ctx, |ui| match self.current_section {
            Section::Dashboard => {
                if let Some(next) = dashboard::show(self, ui, &snapshot) {
                    self.navigate(next);
                }
            }
            Section::Patients | Section::Appointments => call_panel::show(self, ui),
            Section::WaitingRoom => waiting_room_display::show(ui, &snapshot),
            Section::Inventory => inventory_panel::show(self, ui),
            other => {
                ui.centered_and_justified(|ui| {
                    ui.label(format!("{} - Coming Soon", other.name()));
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let mut config = AppConfig::default();
        config.audio.enabled = false;
        App::new(config, rt, None)
    }

    fn login_as(app: &mut App, username: &str) {
        app.login_form.username = username.to_string();
        app.login_form.password = mock::DEMO_PASSWORD.to_string();
        app.login();
        assert!(app.session.is_authenticated());
    }

    #[test]
    fn test_login_failure_keeps_form_error() {
        let mut app = app();
        app.login_form.username = "admin".to_string();
        app.login_form.password = "nope".to_string();
        app.login();

        assert!(!app.session.is_authenticated());
        assert!(app.login_form.error.is_some());
        assert!(app.login_form.password.is_empty());
    }

    #[test]
    fn test_navigation_respects_role() {
        let mut app = app();
        login_as(&mut app, "reception");

        app.navigate(Section::Inventory);
        assert_eq!(app.current_section, Section::Dashboard);
        let refused = app.log_messages.last().unwrap();
        assert!(matches!(refused.level, LogLevel::Warning));
        assert!(refused.message.starts_with("Inventory"));

        app.navigate(Section::WaitingRoom);
        assert_eq!(app.current_section, Section::WaitingRoom);

        app.logout();
        assert_eq!(app.current_section, Section::Dashboard);
    }

    #[test]
    fn test_start_section_from_config() {
        let mut app = app();
        app.config.ui.start_panel = "waiting_room".to_string();
        login_as(&mut app, "dr.benali");
        assert_eq!(app.current_section, Section::WaitingRoom);
    }

    #[test]
    fn test_select_doctor_defaults_cabinet() {
        let mut app = app();
        app.select_doctor("d2");
        assert_eq!(app.call_form.cabinet_number, "1");
        assert_eq!(app.selected_doctor().map(|d| d.id.as_str()), Some("d2"));
    }

    #[test]
    fn test_call_patient_updates_waiting_room() {
        let mut app = app();
        login_as(&mut app, "dr.benali");

        app.call_patient("p2");
        let current = app.waiting_room.current_call().unwrap();
        assert_eq!(current.patient.id, "p2");
        assert_eq!(current.cabinet_number, "3");
        assert_eq!(app.calls_today(), 1);
        assert!(app.call_form.error.is_none());
    }

    #[test]
    fn test_call_patient_with_blank_cabinet_reports_error() {
        let mut app = app();
        app.call_form.cabinet_number = "  ".to_string();

        app.call_patient("p1");
        assert!(app.call_form.error.is_some());
        assert!(app.waiting_room.current_call().is_none());
        assert_eq!(app.calls_today(), 0);

        let entry = app.log_messages.last().unwrap();
        assert!(matches!(entry.level, LogLevel::Error));
        assert!(entry.message.starts_with("Call failed"));
    }
}
