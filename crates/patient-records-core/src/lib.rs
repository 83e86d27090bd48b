//! Patient Records Core Library
//!
//! Single-operator patient record manager persisting to a CSV or JSON file.
//!
//! # Architecture
//!
//! ```text
//!   Console (add / list / search / update / delete)
//!                        │
//!              ┌─────────▼─────────┐
//!              │  PatientRecords   │──── validation (date, phone)
//!              │  load → modify →  │──── age (from date of birth)
//!              │  save (full set)  │
//!              └─────────┬─────────┘
//!                        │
//!              ┌─────────┴─────────┐
//!              ▼                   ▼
//!         patients.csv        patients.json
//! ```
//!
//! # Core Principle
//!
//! **The backing file is the only state.** Each operation reloads the whole
//! collection and each mutation rewrites it.
//!
//! # Modules
//!
//! - [`validation`]: `DD-MM-YYYY` date and `DDD-DDD-DDDD` phone checks
//! - [`age`]: age in whole years from a birth date
//! - [`models`]: Domain types (Patient, NewPatient, PatientUpdate, ...)
//! - [`store`]: CSV and JSON record stores
//! - [`records`]: Patient operations

pub mod age;
pub mod models;
pub mod records;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use age::{calculate_age, calculate_age_on};
pub use models::{NewPatient, Patient, PatientField, PatientUpdate, PATIENT_COLUMNS};
pub use records::{PatientInput, PatientRecords, RecordsError, RecordsResult};
pub use store::{
    CsvStore, JsonStore, RecordStore, StorageKind, StoreConfig, StoreError, StoreResult,
};
pub use validation::{validate_date, validate_phone, DateParseError};

/// Open patient operations over the backend described by `config`.
pub fn open_records(config: &StoreConfig) -> PatientRecords<Box<dyn RecordStore>> {
    log::debug!("Opening {} store at {:?}", config.kind, config.file_path());
    PatientRecords::new(config.open())
}
