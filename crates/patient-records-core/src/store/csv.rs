//! CSV backend.
//!
//! One header row followed by one row per record. Fields containing a comma,
//! quote or line break are wrapped in double quotes with inner quotes doubled.
//! Every value is written as text; `age` is parsed back into an integer.

use std::path::PathBuf;

use log::info;

use super::{read_if_exists, write_atomic, RecordStore, StoreError, StoreResult};
use crate::models::{Patient, PATIENT_COLUMNS};

/// Patient store backed by a CSV file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordStore for CsvStore {
    fn load(&self) -> StoreResult<Vec<Patient>> {
        match read_if_exists(&self.path)? {
            Some(contents) => from_csv(&contents),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, patients: &[Patient]) -> StoreResult<()> {
        write_atomic(&self.path, to_csv(patients).as_bytes())?;
        info!("Saved {} patients to {:?}", patients.len(), self.path);
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// Render patients as CSV text, header first.
pub fn to_csv(patients: &[Patient]) -> String {
    let mut csv = String::new();

    // Header
    csv.push_str(&PATIENT_COLUMNS.join(","));
    csv.push('\n');

    for p in patients {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            escape_csv(&p.id),
            escape_csv(&p.first_name),
            escape_csv(&p.last_name),
            escape_csv(&p.date_of_birth),
            p.age,
            escape_csv(&p.hometown),
            escape_csv(&p.house_number),
            escape_csv(&p.phone_number),
        ));
    }

    csv
}

/// Parse CSV text produced by [`to_csv`] (or any writer using the same header).
pub fn from_csv(text: &str) -> StoreResult<Vec<Patient>> {
    let mut rows = parse_rows(text)?.into_iter();

    let (line, header) = match rows.next() {
        Some(first) => first,
        None => return Ok(Vec::new()),
    };
    if header.iter().map(String::as_str).ne(PATIENT_COLUMNS) {
        return Err(StoreError::Malformed {
            line,
            reason: format!("unexpected header: {}", header.join(",")),
        });
    }

    rows.map(|(line, row)| row_to_patient(line, row)).collect()
}

fn row_to_patient(line: usize, row: Vec<String>) -> StoreResult<Patient> {
    let fields: [String; 8] = row.try_into().map_err(|row: Vec<String>| {
        StoreError::Malformed {
            line,
            reason: format!("expected {} columns, found {}", PATIENT_COLUMNS.len(), row.len()),
        }
    })?;
    let [id, first_name, last_name, date_of_birth, age, hometown, house_number, phone_number] =
        fields;

    let age = age.trim().parse().map_err(|_| StoreError::Malformed {
        line,
        reason: format!("invalid age: '{}'", age),
    })?;

    Ok(Patient {
        id,
        first_name,
        last_name,
        date_of_birth,
        age,
        hometown,
        house_number,
        phone_number,
    })
}

/// Split CSV text into rows of fields, each tagged with its starting line.
///
/// Blank lines are skipped. Quoted fields may span lines.
fn parse_rows(text: &str) -> StoreResult<Vec<(usize, Vec<String>)>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_line = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                quoted = false;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if !row.is_empty() || !field.is_empty() || quoted {
                    row.push(std::mem::take(&mut field));
                    rows.push((row_line, std::mem::take(&mut row)));
                }
                quoted = false;
                line += 1;
                row_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(StoreError::Malformed {
            line: row_line,
            reason: "unterminated quoted field".into(),
        });
    }
    if !row.is_empty() || !field.is_empty() || quoted {
        row.push(field);
        rows.push((row_line, row));
    }

    Ok(rows)
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
