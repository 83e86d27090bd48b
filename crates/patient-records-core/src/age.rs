//! Age calculation from a `DD-MM-YYYY` birth date.

use chrono::{Datelike, Local, NaiveDate};

use crate::validation::{parse_date, DateResult};

/// Age in whole years as of the current local date.
pub fn calculate_age(date_of_birth: &str) -> DateResult<i32> {
    calculate_age_on(date_of_birth, Local::now().date_naive())
}

/// Age in whole years as of `today`.
///
/// The year difference is reduced by one when the birthday has not yet been
/// reached this year. A birth date after `today` gives a negative age.
pub fn calculate_age_on(date_of_birth: &str, today: NaiveDate) -> DateResult<i32> {
    let birth = parse_date(date_of_birth)?;
    let before_birthday = (today.month(), today.day()) < (birth.month(), birth.day());
    Ok(today.year() - birth.year() - i32::from(before_birthday))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::DateParseError;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_birthday_passed() {
        assert_eq!(calculate_age_on("01-01-2000", day(2024, 6, 15)), Ok(24));
    }

    #[test]
    fn test_birthday_not_yet_reached() {
        assert_eq!(calculate_age_on("02-01-2000", day(2024, 1, 1)), Ok(23));
    }

    #[test]
    fn test_on_birthday() {
        assert_eq!(calculate_age_on("15-06-1990", day(2024, 6, 15)), Ok(34));
        assert_eq!(calculate_age_on("16-06-1990", day(2024, 6, 15)), Ok(33));
    }

    #[test]
    fn test_leap_day_birthday() {
        assert_eq!(calculate_age_on("29-02-2000", day(2023, 2, 28)), Ok(22));
        assert_eq!(calculate_age_on("29-02-2000", day(2023, 3, 1)), Ok(23));
    }

    #[test]
    fn test_future_birth_date() {
        assert_eq!(calculate_age_on("01-01-2030", day(2024, 6, 15)), Ok(-6));
    }

    #[test]
    fn test_malformed_date() {
        assert!(matches!(
            calculate_age_on("2000-01-01", day(2024, 6, 15)),
            Err(DateParseError::Format(_))
        ));
    }

    #[test]
    fn test_against_local_clock() {
        let today = Local::now().date_naive();
        let dob = format!("01-01-{:04}", today.year() - 30);
        assert_eq!(calculate_age(&dob), Ok(30));
    }
}
