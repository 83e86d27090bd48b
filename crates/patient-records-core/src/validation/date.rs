//! Date of birth validation (`DD-MM-YYYY`).

use chrono::NaiveDate;

use super::{DateParseError, DateResult};

/// Length of a `DD-MM-YYYY` string.
const DATE_LEN: usize = 10;

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`, or `None` for an invalid month.
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return None,
    };
    Some(days)
}

/// Parse a `DD-MM-YYYY` string into a calendar date.
pub fn parse_date(s: &str) -> DateResult<NaiveDate> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == DATE_LEN
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(DateParseError::Format(s.to_string()));
    }

    // Shape is checked, so every slice is all ASCII digits.
    let day = digits(&bytes[0..2]);
    let month = digits(&bytes[3..5]);
    let year = digits(&bytes[6..10]) as i32;

    let max_day = days_in_month(month, year).ok_or(DateParseError::MonthOutOfRange(month))?;
    if day < 1 || day > max_day {
        return Err(DateParseError::DayOutOfRange { day, month, year });
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateParseError::DayOutOfRange { day, month, year })
}

/// Check that a string is a real calendar date in `DD-MM-YYYY` format.
pub fn validate_date(s: &str) -> bool {
    parse_date(s).is_ok()
}

fn digits(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dates() {
        assert!(validate_date("01-01-2000"));
        assert!(validate_date("31-12-1999"));
        assert!(validate_date("29-02-2024"));
        assert!(validate_date("29-02-2000"));
        assert!(validate_date("01-01-0001"));
        assert!(validate_date("31-12-9999"));
    }

    #[test]
    fn test_invalid_calendar_dates() {
        assert!(!validate_date("30-02-2024"));
        assert!(!validate_date("31-04-2023"));
        assert!(!validate_date("00-01-2020"));
        assert!(!validate_date("15-13-2020"));
        assert!(!validate_date("15-00-2020"));
        assert!(!validate_date("29-02-1900"));
        assert!(!validate_date("29-02-2023"));
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(!validate_date(""));
        assert!(!validate_date("1-1-2000"));
        assert!(!validate_date("01/01/2000"));
        assert!(!validate_date("2000-01-01"));
        assert!(!validate_date("01-01-20000"));
        assert!(!validate_date(" 01-01-2000"));
        assert!(!validate_date("01-01-2000\n"));
        assert!(!validate_date("ab-cd-efgh"));
        assert!(!validate_date("٠١-٠١-٢٠٠٠"));
    }

    #[test]
    fn test_parse_date_errors() {
        assert_eq!(
            parse_date("15-13-2020"),
            Err(DateParseError::MonthOutOfRange(13))
        );
        assert_eq!(
            parse_date("31-04-2023"),
            Err(DateParseError::DayOutOfRange {
                day: 31,
                month: 4,
                year: 2023
            })
        );
        assert!(matches!(parse_date("x"), Err(DateParseError::Format(_))));
    }

    #[test]
    fn test_parse_date_value() {
        let date = parse_date("15-06-1985").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1985, 6, 15).unwrap());
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2, 2024), Some(29));
        assert_eq!(days_in_month(2, 2100), Some(28));
        assert_eq!(days_in_month(13, 2024), None);
    }
}
