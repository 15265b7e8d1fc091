//! Built-in demo data. The desk has no backend; every list comes from here.

use chrono::NaiveDate;

use crate::models::{Doctor, Gender, Medicine, Patient, PatientType, User, UserRole};

/// Password accepted for every demo account.
pub const DEMO_PASSWORD: &str = "123456";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn user(id: &str, firstname: &str, lastname: &str, username: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        firstname: firstname.to_string(),
        lastname: lastname.to_string(),
        email: format!("{username}@clinic.ma"),
        username: username.to_string(),
        role,
        is_active: true,
    }
}

/// Staff accounts available on the login screen.
pub fn users() -> Vec<User> {
    vec![
        user("1", "Sarah", "Benali", "dr.benali", UserRole::Doctor),
        user("2", "Ahmed", "Alami", "admin", UserRole::AdminMedical),
        user("3", "Fatima", "Zahra", "reception", UserRole::Receptionist),
    ]
}

pub fn doctors() -> Vec<Doctor> {
    let doctor = |id: &str, firstname: &str, lastname: &str, specialization: &str, cabinet: &str| Doctor {
        id: id.to_string(),
        firstname: firstname.to_string(),
        lastname: lastname.to_string(),
        specialization: specialization.to_string(),
        cabinet_number: cabinet.to_string(),
    };

    vec![
        doctor("d1", "Sarah", "Benali", "Orthodontics", "3"),
        doctor("d2", "Youssef", "Idrissi", "Endodontics", "1"),
        doctor("d3", "Nadia", "Chraibi", "Pediatric dentistry", "2"),
    ]
}

/// Patients currently in the waiting room.
pub fn patients() -> Vec<Patient> {
    #[allow(clippy::too_many_arguments)]
    fn patient(
        id: &str,
        firstname: &str,
        lastname: &str,
        phone: &str,
        gender: Gender,
        city: &str,
        patient_type: PatientType,
        born: NaiveDate,
    ) -> Patient {
        Patient {
            id: id.to_string(),
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            phone: phone.to_string(),
            gender,
            city: city.to_string(),
            patient_type,
            date_of_birth: born,
        }
    }

    vec![
        patient(
            "p1",
            "Mohammed",
            "Tazi",
            "0661112233",
            Gender::Male,
            "Casablanca",
            PatientType::OldPatient,
            date(1985, 4, 12),
        ),
        patient(
            "p2",
            "Amina",
            "El Fassi",
            "0662223344",
            Gender::Female,
            "Rabat",
            PatientType::NewPatient,
            date(1992, 9, 3),
        ),
        patient(
            "p3",
            "Karim",
            "Bennani",
            "0663334455",
            Gender::Male,
            "Casablanca",
            PatientType::UrgencePatient,
            date(1978, 1, 27),
        ),
        patient(
            "p4",
            "Salma",
            "Ouazzani",
            "0664445566",
            Gender::Female,
            "Mohammedia",
            PatientType::OldPatient,
            date(2010, 6, 18),
        ),
        patient(
            "p5",
            "Hicham",
            "Berrada",
            "0665556677",
            Gender::Male,
            "Rabat",
            PatientType::NewPatient,
            date(1969, 11, 30),
        ),
        patient(
            "p6",
            "Leila",
            "Amrani",
            "0666667788",
            Gender::Female,
            "Casablanca",
            PatientType::OldPatient,
            date(1999, 2, 8),
        ),
    ]
}

/// Stock lines shown on the inventory panel.
pub fn medicines() -> Vec<Medicine> {
    let medicine = |id: &str, name: &str, barcode: &str, quantity: u32, unit: &str, expiry: NaiveDate, provider: &str, price: f64| {
        Medicine {
            id: id.to_string(),
            name: name.to_string(),
            barcode: barcode.to_string(),
            quantity,
            unit: unit.to_string(),
            expiry_date: expiry,
            provider: provider.to_string(),
            price,
        }
    };

    vec![
        medicine("1", "Local anaesthetic", "1234567890123", 5, "ampoules", date(2024, 6, 15), "Pharma Dental", 45.50),
        medicine("2", "Dental composite", "2345678901234", 25, "syringes", date(2027, 3, 20), "DentMat", 89.00),
        medicine("3", "Disinfectant", "3456789012345", 2, "litres", date(2024, 2, 28), "MediClean", 25.75),
        medicine("4", "Impression alginate", "4567890123456", 14, "bags", date(2027, 11, 5), "DentMat", 62.00),
        medicine("5", "Nitrile gloves", "5678901234567", 8, "boxes", date(2028, 1, 31), "MediClean", 38.90),
    ]
}
