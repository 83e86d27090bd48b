//! Console prompts and messages.

/// Startup question for the storage backend.
pub const STORAGE_PROMPT: &str = "Select storage type (csv/json): ";

/// Shown when the storage answer is neither `csv` nor `json`.
pub const INVALID_STORAGE: &str = "Invalid storage type. Defaulting to CSV.";

/// Main menu, printed before every choice.
pub const MENU: &str = "\n1. Add New Patient\n\
2. Get All Patients\n\
3. Search Patient by ID\n\
4. Update Patient by ID\n\
5. Delete Patient by ID\n\
6. Exit";

pub const CHOICE_PROMPT: &str = "Enter your choice: ";
pub const INVALID_CHOICE: &str = "Invalid option. Please try again.";

pub const SEARCH_PROMPT: &str = "Enter patient ID to search: ";
pub const UPDATE_PROMPT: &str = "Enter patient ID to update: ";
pub const DELETE_PROMPT: &str = "Enter patient ID to delete: ";

pub const NOT_FOUND: &str = "Patient not found.";
pub const DELETE_NOT_FOUND: &str = "Patient not found. Try again";
/// Shown when an operation finds no backing file yet.
pub const NEW_FILE_NOTICE: &str = "File not found. Creating new file.";
pub const NO_PATIENTS: &str = "No patients stored yet.";
pub const EXITING: &str = "Exiting program.";

/// Confirmation after a record is stored.
pub fn added_message(id: &str) -> String {
    format!("Patient added with ID {}.", id)
}

pub fn updated_message(id: &str) -> String {
    format!("Patient {} updated.", id)
}

pub fn deleted_message(id: &str) -> String {
    format!("Patient {} deleted.", id)
}
