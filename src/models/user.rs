//! Staff user accounts and roles.

use serde::{Deserialize, Serialize};

/// Staff role, which drives the sections a user may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    AdminMedical,
    AdminAdministrative,
    Doctor,
    Receptionist,
    Assistant,
    CallCenter,
    Radiologist,
    Photograph,
    LabAgent,
}

impl UserRole {
    /// Get human-readable name for the role.
    pub fn name(&self) -> &'static str {
        match self {
            UserRole::AdminMedical => "Medical admin",
            UserRole::AdminAdministrative => "Administrative admin",
            UserRole::Doctor => "Doctor",
            UserRole::Receptionist => "Receptionist",
            UserRole::Assistant => "Assistant",
            UserRole::CallCenter => "Call center",
            UserRole::Radiologist => "Radiologist",
            UserRole::Photograph => "Photographer",
            UserRole::LabAgent => "Lab agent",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::AdminMedical | UserRole::AdminAdministrative)
    }
}

/// Staff account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub username: String,
    pub role: UserRole,
    pub is_active: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }

    /// Two-letter initials for the sidebar badge.
    pub fn initials(&self) -> String {
        self.firstname
            .chars()
            .take(1)
            .chain(self.lastname.chars().take(1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        let user = User {
            id: "1".to_string(),
            firstname: "Fatima".to_string(),
            lastname: "Zahra".to_string(),
            email: String::new(),
            username: "reception".to_string(),
            role: UserRole::Receptionist,
            is_active: true,
        };
        assert_eq!(user.initials(), "FZ");
        assert_eq!(user.full_name(), "Fatima Zahra");
    }

    #[test]
    fn test_admin_roles() {
        assert!(UserRole::AdminMedical.is_admin());
        assert!(UserRole::AdminAdministrative.is_admin());
        assert!(!UserRole::Doctor.is_admin());
    }
}
