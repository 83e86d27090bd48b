//! Field validation for patient records.
//!
//! Only the date of birth and the phone number carry a format. Both checks
//! are pure and never panic: malformed input simply fails validation.

mod date;
mod phone;

pub use date::*;
pub use phone::*;

use thiserror::Error;

/// Date parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("Expected a date in DD-MM-YYYY format, got '{0}'")]
    Format(String),

    #[error("Month out of range: {0}")]
    MonthOutOfRange(u32),

    #[error("Day {day} out of range for {month:02}-{year:04}")]
    DayOutOfRange { day: u32, month: u32, year: i32 },
}

pub type DateResult<T> = Result<T, DateParseError>;
