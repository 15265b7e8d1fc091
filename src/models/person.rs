//! Patient and doctor records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Patient classification used for triage at the front desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientType {
    OldPatient,
    NewPatient,
    UrgencePatient,
}

impl PatientType {
    /// Get human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PatientType::OldPatient => "Returning",
            PatientType::NewPatient => "New",
            PatientType::UrgencePatient => "Emergency",
        }
    }
}

/// Patient record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub phone: String,
    pub gender: Gender,
    pub city: String,
    pub patient_type: PatientType,
    pub date_of_birth: NaiveDate,
}

/// Doctor record with the cabinet they normally work in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub specialization: String,
    pub cabinet_number: String,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

impl Doctor {
    /// Name as shown on the waiting-room display.
    pub fn display_name(&self) -> String {
        format!("Dr. {} {}", self.firstname, self.lastname)
    }
}
