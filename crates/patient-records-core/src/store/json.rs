//! JSON backend: an array of record objects indented by four spaces.

use std::path::PathBuf;

use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::{read_if_exists, write_atomic, RecordStore, StoreResult};
use crate::models::Patient;

const INDENT: &[u8] = b"    ";

/// Patient store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordStore for JsonStore {
    fn load(&self) -> StoreResult<Vec<Patient>> {
        match read_if_exists(&self.path)? {
            // An empty file has never been written by us; treat it as no data.
            Some(contents) if contents.trim().is_empty() => Ok(Vec::new()),
            Some(contents) => Ok(serde_json::from_str(&contents)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, patients: &[Patient]) -> StoreResult<()> {
        write_atomic(&self.path, &to_json(patients)?)?;
        info!("Saved {} patients to {:?}", patients.len(), self.path);
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// Serialize patients as a pretty-printed JSON array.
pub fn to_json(patients: &[Patient]) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    patients.serialize(&mut ser)?;
    Ok(buf)
}
