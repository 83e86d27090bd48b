//! Patient models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::age::calculate_age_on;
use crate::validation::DateResult;

/// Column names of a stored patient record, in record order.
pub const PATIENT_COLUMNS: [&str; 8] = [
    "id",
    "first_name",
    "last_name",
    "date_of_birth",
    "age",
    "hometown",
    "house_number",
    "phone_number",
];

/// A stored patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    /// Sequential record ID ("1", "2", ...)
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Date of birth (DD-MM-YYYY)
    pub date_of_birth: String,
    /// Age in whole years, derived from `date_of_birth`
    #[serde(deserialize_with = "deserialize_age")]
    pub age: i32,
    /// Hometown
    pub hometown: String,
    /// House number (free text, e.g. "12B")
    pub house_number: String,
    /// Phone number (DDD-DDD-DDDD)
    pub phone_number: String,
}

/// Field values collected for a patient that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub hometown: String,
    pub house_number: String,
    pub phone_number: String,
}

impl NewPatient {
    pub fn set(&mut self, field: PatientField, value: impl Into<String>) {
        let slot = match field {
            PatientField::FirstName => &mut self.first_name,
            PatientField::LastName => &mut self.last_name,
            PatientField::DateOfBirth => &mut self.date_of_birth,
            PatientField::Hometown => &mut self.hometown,
            PatientField::HouseNumber => &mut self.house_number,
            PatientField::PhoneNumber => &mut self.phone_number,
        };
        *slot = value.into();
    }
}

impl Patient {
    /// Build a stored record from collected fields.
    pub fn from_new(id: String, new: NewPatient, age: i32) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            date_of_birth: new.date_of_birth,
            age,
            hometown: new.hometown,
            house_number: new.house_number,
            phone_number: new.phone_number,
        }
    }

    /// Current value of an editable field.
    pub fn field(&self, field: PatientField) -> &str {
        match field {
            PatientField::FirstName => &self.first_name,
            PatientField::LastName => &self.last_name,
            PatientField::DateOfBirth => &self.date_of_birth,
            PatientField::Hometown => &self.hometown,
            PatientField::HouseNumber => &self.house_number,
            PatientField::PhoneNumber => &self.phone_number,
        }
    }

    fn field_mut(&mut self, field: PatientField) -> &mut String {
        match field {
            PatientField::FirstName => &mut self.first_name,
            PatientField::LastName => &mut self.last_name,
            PatientField::DateOfBirth => &mut self.date_of_birth,
            PatientField::Hometown => &mut self.hometown,
            PatientField::HouseNumber => &mut self.house_number,
            PatientField::PhoneNumber => &mut self.phone_number,
        }
    }

    /// Apply a change set. Returns true if the date of birth changed.
    ///
    /// Age is not touched here; see [`Patient::refresh_age`].
    pub fn apply(&mut self, update: &PatientUpdate) -> bool {
        let previous_dob = self.date_of_birth.clone();
        for field in PatientField::ALL {
            if let Some(value) = update.get(field) {
                *self.field_mut(field) = value.to_string();
            }
        }
        self.date_of_birth != previous_dob
    }

    /// Recompute `age` from `date_of_birth` as of `today`.
    pub fn refresh_age(&mut self, today: NaiveDate) -> DateResult<()> {
        self.age = calculate_age_on(&self.date_of_birth, today)?;
        Ok(())
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{id: {}, first_name: {}, last_name: {}, date_of_birth: {}, age: {}, \
             hometown: {}, house_number: {}, phone_number: {}}}",
            self.id,
            self.first_name,
            self.last_name,
            self.date_of_birth,
            self.age,
            self.hometown,
            self.house_number,
            self.phone_number,
        )
    }
}

/// Fields an operator may edit on an existing record, in record order.
///
/// `id` is fixed at creation and `age` is always derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatientField {
    FirstName,
    LastName,
    DateOfBirth,
    Hometown,
    HouseNumber,
    PhoneNumber,
}

impl PatientField {
    pub const ALL: [PatientField; 6] = [
        PatientField::FirstName,
        PatientField::LastName,
        PatientField::DateOfBirth,
        PatientField::Hometown,
        PatientField::HouseNumber,
        PatientField::PhoneNumber,
    ];

    /// Storage key of the field.
    pub fn key(self) -> &'static str {
        match self {
            PatientField::FirstName => "first_name",
            PatientField::LastName => "last_name",
            PatientField::DateOfBirth => "date_of_birth",
            PatientField::Hometown => "hometown",
            PatientField::HouseNumber => "house_number",
            PatientField::PhoneNumber => "phone_number",
        }
    }

    /// Prompt shown when collecting the field for a new record.
    pub fn prompt(self) -> &'static str {
        match self {
            PatientField::FirstName => "First Name: ",
            PatientField::LastName => "Last Name: ",
            PatientField::DateOfBirth => "Date of Birth (dd-mm-yyyy): ",
            PatientField::Hometown => "Hometown: ",
            PatientField::HouseNumber => "House Number: ",
            PatientField::PhoneNumber => "Phone Number (024-000-0000): ",
        }
    }
}

impl fmt::Display for PatientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A partial change to a patient record. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub hometown: Option<String>,
    pub house_number: Option<String>,
    pub phone_number: Option<String>,
}

impl PatientUpdate {
    fn slot(&mut self, field: PatientField) -> &mut Option<String> {
        match field {
            PatientField::FirstName => &mut self.first_name,
            PatientField::LastName => &mut self.last_name,
            PatientField::DateOfBirth => &mut self.date_of_birth,
            PatientField::Hometown => &mut self.hometown,
            PatientField::HouseNumber => &mut self.house_number,
            PatientField::PhoneNumber => &mut self.phone_number,
        }
    }

    /// Set a new value for a field.
    pub fn set(&mut self, field: PatientField, value: impl Into<String>) {
        *self.slot(field) = Some(value.into());
    }

    /// Builder form of [`PatientUpdate::set`].
    pub fn with(mut self, field: PatientField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// New value for a field, if any.
    pub fn get(&self, field: PatientField) -> Option<&str> {
        let value = match field {
            PatientField::FirstName => &self.first_name,
            PatientField::LastName => &self.last_name,
            PatientField::DateOfBirth => &self.date_of_birth,
            PatientField::Hometown => &self.hometown,
            PatientField::HouseNumber => &self.house_number,
            PatientField::PhoneNumber => &self.phone_number,
        };
        value.as_deref()
    }

    /// Check if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        PatientField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// Accept `age` as a JSON integer or as a numeric string.
fn deserialize_age<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AgeRepr {
        Number(i32),
        Text(String),
    }

    match AgeRepr::deserialize(deserializer)? {
        AgeRepr::Number(age) => Ok(age),
        AgeRepr::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid age: '{}'", text))),
    }
}
