//! Data models for patients, doctors, staff users, and inventory items.

pub mod medicine;
pub mod person;
pub mod user;

pub use medicine::Medicine;
pub use person::{Doctor, Gender, Patient, PatientType};
pub use user::{User, UserRole};
