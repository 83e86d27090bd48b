//! Patient operations: add, list, search, update and delete.
//!
//! Every call reloads the full collection from the store, and every mutation
//! writes the full collection back.

mod input;

pub use input::*;

use std::io;

use chrono::{Local, NaiveDate};
use log::{debug, info};
use thiserror::Error;

use crate::models::{NewPatient, Patient, PatientField, PatientUpdate};
use crate::store::{RecordStore, StoreError};
use crate::validation::{validate_date, validate_phone, DateParseError};

/// Shown when an entered date of birth is rejected.
pub const INVALID_DATE_MESSAGE: &str = "Invalid date format or date. Please try again.";
/// Shown when an entered phone number is rejected.
pub const INVALID_PHONE_MESSAGE: &str = "Invalid phone number format. Please try again!.";

/// Patient operation errors.
#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Cannot compute age: {0}")]
    Age(#[from] DateParseError),

    #[error("Invalid date of birth: {0}")]
    InvalidDateOfBirth(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Input error: {0}")]
    Input(#[from] io::Error),

    #[error("Input closed before all fields were entered")]
    InputClosed,
}

pub type RecordsResult<T> = Result<T, RecordsError>;

/// Id for the next record: one more than the current record count.
///
/// After a delete, the next add can repeat an id that is still present.
pub fn next_id(patients: &[Patient]) -> String {
    (patients.len() + 1).to_string()
}

/// Patient operations over a record store.
pub struct PatientRecords<S> {
    store: S,
    today: Option<NaiveDate>,
}

impl<S: RecordStore> PatientRecords<S> {
    /// Create patient operations over `store`, using the local clock for ages.
    pub fn new(store: S) -> Self {
        Self { store, today: None }
    }

    /// Compute ages against a fixed date instead of the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check if the backing file has been written yet.
    pub fn has_backing_file(&self) -> bool {
        self.store.exists()
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn load(&self) -> RecordsResult<Vec<Patient>> {
        let patients = self.store.load()?;
        debug!("Loaded {} patients", patients.len());
        Ok(patients)
    }

    /// Interactively collect a new patient and store it.
    ///
    /// Date of birth and phone number are asked again until they validate.
    pub fn add(&self, input: &mut dyn PatientInput) -> RecordsResult<Patient> {
        let mut new = NewPatient::default();
        for field in PatientField::ALL {
            loop {
                let value = input
                    .read_line(field.prompt())?
                    .ok_or(RecordsError::InputClosed)?;
                let rejection = match field {
                    PatientField::DateOfBirth if !validate_date(&value) => {
                        Some(INVALID_DATE_MESSAGE)
                    }
                    PatientField::PhoneNumber if !validate_phone(&value) => {
                        Some(INVALID_PHONE_MESSAGE)
                    }
                    _ => None,
                };
                match rejection {
                    Some(message) => {
                        // Never log the rejected value itself.
                        debug!("Rejected {} answer", field);
                        input.warn(message);
                    }
                    None => {
                        new.set(field, value);
                        break;
                    }
                }
            }
        }
        self.add_patient(new)
    }

    /// Validate and store a fully collected patient.
    pub fn add_patient(&self, new: NewPatient) -> RecordsResult<Patient> {
        if !validate_date(&new.date_of_birth) {
            return Err(RecordsError::InvalidDateOfBirth(new.date_of_birth));
        }
        if !validate_phone(&new.phone_number) {
            return Err(RecordsError::InvalidPhoneNumber(new.phone_number));
        }

        let mut patients = self.load()?;
        let id = next_id(&patients);
        let age = crate::age::calculate_age_on(&new.date_of_birth, self.today())?;
        let patient = Patient::from_new(id, new, age);

        patients.push(patient.clone());
        self.store.save(&patients)?;
        info!("Added patient {}", patient.id);
        Ok(patient)
    }

    /// All records in stored order.
    pub fn list_all(&self) -> RecordsResult<Vec<Patient>> {
        self.load()
    }

    /// First record whose id equals `id` exactly.
    pub fn search_by_id(&self, id: &str) -> RecordsResult<Option<Patient>> {
        Ok(self.load()?.into_iter().find(|p| p.id == id))
    }

    /// Interactively edit a record. Returns false if no record has `id`.
    ///
    /// Each editable field is offered in turn; an empty answer keeps it.
    /// New values are not format-checked.
    pub fn update_by_id(&self, id: &str, input: &mut dyn PatientInput) -> RecordsResult<bool> {
        let patients = self.load()?;
        let index = match patients.iter().position(|p| p.id == id) {
            Some(index) => index,
            None => return Ok(false),
        };

        let mut update = PatientUpdate::default();
        for field in PatientField::ALL {
            let prompt = format!(
                "Enter new {} or press Enter to keep '{}': ",
                field,
                patients[index].field(field)
            );
            let value = input.read_line(&prompt)?.ok_or(RecordsError::InputClosed)?;
            if !value.is_empty() {
                update.set(field, value);
            }
        }

        self.commit_update(patients, index, &update)?;
        Ok(true)
    }

    /// Apply a change set to the record with `id`.
    ///
    /// Returns the updated record, or `None` if no record has `id`.
    pub fn apply_update(&self, id: &str, update: &PatientUpdate) -> RecordsResult<Option<Patient>> {
        let patients = self.load()?;
        match patients.iter().position(|p| p.id == id) {
            Some(index) => self.commit_update(patients, index, update).map(Some),
            None => Ok(None),
        }
    }

    fn commit_update(
        &self,
        mut patients: Vec<Patient>,
        index: usize,
        update: &PatientUpdate,
    ) -> RecordsResult<Patient> {
        if update.is_empty() {
            debug!("Nothing to update for patient {}", patients[index].id);
            return Ok(patients.swap_remove(index));
        }

        let patient = &mut patients[index];
        if patient.apply(update) {
            patient.refresh_age(self.today())?;
        }
        let updated = patient.clone();

        self.store.save(&patients)?;
        info!("Updated patient {}", updated.id);
        Ok(updated)
    }

    /// Remove the first record with `id`. Returns false if none exists.
    pub fn delete_by_id(&self, id: &str) -> RecordsResult<bool> {
        let mut patients = self.load()?;
        match patients.iter().position(|p| p.id == id) {
            Some(index) => {
                patients.remove(index);
                self.store.save(&patients)?;
                info!("Deleted patient {}", id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
