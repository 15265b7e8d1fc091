//! Mock login session and role-based section permissions.
//!
//! Access checks here only decide what the navigation shows. Nothing is
//! enforced beyond the UI.

use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::mock;
use crate::models::{User, UserRole};

/// Navigable sections of the desk, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Patients,
    Appointments,
    MedicalFiles,
    Prescriptions,
    LabResults,
    Radiology,
    Billing,
    Inventory,
    Staff,
    Messages,
    Statistics,
    WaitingRoom,
    Settings,
}

impl Section {
    pub const ALL: [Section; 14] = [
        Section::Dashboard,
        Section::Patients,
        Section::Appointments,
        Section::MedicalFiles,
        Section::Prescriptions,
        Section::LabResults,
        Section::Radiology,
        Section::Billing,
        Section::Inventory,
        Section::Staff,
        Section::Messages,
        Section::Statistics,
        Section::WaitingRoom,
        Section::Settings,
    ];

    /// Get the display name for the section.
    pub fn name(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Patients => "Patients",
            Section::Appointments => "Appointments",
            Section::MedicalFiles => "Medical files",
            Section::Prescriptions => "Prescriptions",
            Section::LabResults => "Lab results",
            Section::Radiology => "Radiology",
            Section::Billing => "Billing",
            Section::Inventory => "Inventory",
            Section::Staff => "Staff",
            Section::Messages => "Messages",
            Section::Statistics => "Statistics",
            Section::WaitingRoom => "Waiting room",
            Section::Settings => "Settings",
        }
    }

    /// Permission key as written in config files.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Patients => "patients",
            Section::Appointments => "appointments",
            Section::MedicalFiles => "medical_files",
            Section::Prescriptions => "prescriptions",
            Section::LabResults => "lab_results",
            Section::Radiology => "radiology",
            Section::Billing => "billing",
            Section::Inventory => "inventory",
            Section::Staff => "staff",
            Section::Messages => "messages",
            Section::Statistics => "statistics",
            Section::WaitingRoom => "waiting_room",
            Section::Settings => "settings",
        }
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Sections granted to a role.
fn granted(role: UserRole) -> &'static [Section] {
    use Section::*;
    match role {
        UserRole::AdminMedical | UserRole::AdminAdministrative => &Section::ALL,
        UserRole::Doctor => &[Dashboard, Patients, Appointments, MedicalFiles, Prescriptions, WaitingRoom],
        UserRole::Receptionist => &[Dashboard, Patients, Appointments, Billing, WaitingRoom],
        UserRole::Assistant => &[Dashboard, Patients, MedicalFiles],
        UserRole::CallCenter => &[Dashboard, Patients, Appointments],
        UserRole::Radiologist => &[Dashboard, Patients, Radiology],
        UserRole::Photograph => &[Dashboard, Patients],
        UserRole::LabAgent => &[Dashboard, Patients, LabResults],
    }
}

/// Whether `role` may open `section`. Admins may open everything.
pub fn has_access(role: UserRole, section: Section) -> bool {
    role.is_admin() || granted(role).contains(&section)
}

/// Menu entries for `role`, in menu order.
pub fn visible_sections(role: UserRole) -> Vec<Section> {
    Section::ALL.into_iter().filter(|s| has_access(role, *s)).collect()
}

/// In-memory login state for the desk.
pub struct Session {
    directory: Vec<User>,
    user: Option<User>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(mock::users())
    }
}

impl Session {
    pub fn new(directory: Vec<User>) -> Self {
        Self { directory, user: None }
    }

    /// Check demo credentials and remember the user.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&User> {
        let username = username.trim();
        let Some(found) = self.directory.iter().find(|u| u.username == username) else {
            warn!("Login rejected for unknown user {username:?}");
            return Err(AppError::authentication("invalid username or password"));
        };
        if password != mock::DEMO_PASSWORD {
            warn!("Login rejected for {username:?}: wrong password");
            return Err(AppError::authentication("invalid username or password"));
        }
        if !found.is_active {
            return Err(AppError::authentication(format!("account {username} is disabled")));
        }

        info!("{} logged in as {}", found.full_name(), found.role.name());
        Ok(self.user.insert(found.clone()))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("{} logged out", user.full_name());
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn has_access(&self, section: Section) -> bool {
        self.user.as_ref().is_some_and(|u| has_access(u.role, section))
    }

    /// Menu for the logged-in user; empty when logged out.
    pub fn visible_sections(&self) -> Vec<Section> {
        self.user
            .as_ref()
            .map(|u| visible_sections(u.role))
            .unwrap_or_default()
    }
}
