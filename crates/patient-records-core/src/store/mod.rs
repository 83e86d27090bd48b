//! Persistence layer for patient records.
//!
//! A [`RecordStore`] holds the full record collection in a single backing
//! file. Every save rewrites the whole file; there is no append path.

mod csv;
mod json;

pub use self::csv::*;
pub use self::json::*;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::models::Patient;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed CSV at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Unknown storage kind: {0}")]
    UnknownKind(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A backend holding the full patient collection.
pub trait RecordStore {
    /// Read every record in stored order. A missing backing file is an
    /// empty collection.
    fn load(&self) -> StoreResult<Vec<Patient>>;

    /// Replace the stored collection with `patients`, in the given order.
    fn save(&self, patients: &[Patient]) -> StoreResult<()>;

    /// Check if the backing file has been created yet.
    fn exists(&self) -> bool;
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn load(&self) -> StoreResult<Vec<Patient>> {
        (**self).load()
    }

    fn save(&self, patients: &[Patient]) -> StoreResult<()> {
        (**self).save(patients)
    }

    fn exists(&self) -> bool {
        (**self).exists()
    }
}

/// Selected persistence backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageKind {
    #[default]
    Csv,
    Json,
}

impl StorageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKind::Csv => "csv",
            StorageKind::Json => "json",
        }
    }

    /// Name of the backing file for this kind.
    pub fn file_name(self) -> &'static str {
        match self {
            StorageKind::Csv => "patients.csv",
            StorageKind::Json => "patients.json",
        }
    }
}

impl FromStr for StorageKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(StorageKind::Csv),
            "json" => Ok(StorageKind::Json),
            other => Err(StoreError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how records are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the backing file
    pub data_dir: PathBuf,
    /// Backend selector
    pub kind: StorageKind,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            kind: StorageKind::default(),
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>, kind: StorageKind) -> Self {
        Self {
            data_dir: data_dir.into(),
            kind,
        }
    }

    /// Full path of the backing file.
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(self.kind.file_name())
    }

    /// Open the configured backend.
    pub fn open(&self) -> Box<dyn RecordStore> {
        let path = self.file_path();
        match self.kind {
            StorageKind::Csv => Box::new(CsvStore::new(path)),
            StorageKind::Json => Box::new(JsonStore::new(path)),
        }
    }
}

/// Read a backing file, mapping "not found" to `None`.
fn read_if_exists(path: &Path) -> StoreResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Backing file {:?} not found, starting with no records", path);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Write `contents` to a sibling temp file, then rename it over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, contents)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
