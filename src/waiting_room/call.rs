//! Waiting-room call records.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Doctor, Patient};

/// One "please proceed to cabinet X" announcement.
///
/// Created once per call and never modified; the notifier only hands out clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub id: Uuid,
    pub patient: Patient,
    pub doctor: Doctor,
    pub cabinet_number: String,
    pub timestamp: DateTime<Local>,
}

impl Call {
    /// Validate inputs and stamp a new call.
    pub fn new(patient: Patient, doctor: Doctor, cabinet_number: &str) -> Result<Self> {
        if patient.id.trim().is_empty() {
            return Err(AppError::validation("patient record has no id"));
        }
        if doctor.id.trim().is_empty() {
            return Err(AppError::validation("doctor record has no id"));
        }
        let cabinet_number = cabinet_number.trim();
        if cabinet_number.is_empty() {
            return Err(AppError::validation("cabinet number cannot be empty"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            patient,
            doctor,
            cabinet_number: cabinet_number.to_string(),
            timestamp: Local::now(),
        })
    }

    /// Text read out on the public display.
    pub fn announcement(&self) -> String {
        format!(
            "{}, please proceed to cabinet {} ({})",
            self.patient.full_name(),
            self.cabinet_number,
            self.doctor.display_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn test_new_call_trims_cabinet() {
        let call = Call::new(mock::patients()[0].clone(), mock::doctors()[0].clone(), "  3 ").unwrap();
        assert_eq!(call.cabinet_number, "3");
        assert!(call.announcement().contains("cabinet 3"));
    }

    #[test]
    fn test_new_call_rejects_blank_cabinet() {
        let err = Call::new(mock::patients()[0].clone(), mock::doctors()[0].clone(), "   ").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_new_call_rejects_missing_ids() {
        let mut patient = mock::patients()[0].clone();
        patient.id.clear();
        assert!(Call::new(patient, mock::doctors()[0].clone(), "1").is_err());

        let mut doctor = mock::doctors()[0].clone();
        doctor.id = " ".to_string();
        assert!(Call::new(mock::patients()[0].clone(), doctor, "1").is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Call::new(mock::patients()[0].clone(), mock::doctors()[0].clone(), "1").unwrap();
        let b = Call::new(mock::patients()[0].clone(), mock::doctors()[0].clone(), "1").unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.patient, b.patient);
    }
}
