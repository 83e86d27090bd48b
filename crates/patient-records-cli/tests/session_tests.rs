//! End-to-end console sessions against a scratch data directory.

use std::io::Cursor;

use patient_records_cli::prompts::*;
use patient_records_cli::{run, select_storage, Console};
use patient_records_core::{open_records, StorageKind, StoreConfig};

/// Run a whole session from startup answers to exit, returning the output.
fn run_session(dir: &std::path::Path, script: &str) -> (StorageKind, String) {
    let mut console = Console::new(Cursor::new(script.to_string()), Vec::new());
    let kind = select_storage(&mut console).unwrap();
    let records = open_records(&StoreConfig::new(dir, kind));
    run(&records, &mut console).unwrap();
    (kind, String::from_utf8(console.into_writer()).unwrap())
}

const ADD_AMA: &str = "1\nAma\nMensah\n31-02-2000\n01-01-2000\nAccra\n12B\n024-000-0000\n";

#[test]
fn test_full_session_json() {
    let dir = tempfile::tempdir().unwrap();
    let script = format!(
        "json\n{}2\n3\n1\n3\n9\n4\n1\n\n\n\nKumasi\n\n\n5\n7\n5\n1\n2\n6\n",
        ADD_AMA
    );

    let (kind, output) = run_session(dir.path(), &script);

    assert_eq!(kind, StorageKind::Json);
    assert!(output.contains("Invalid date format or date. Please try again."));
    assert!(output.contains(&added_message("1")));
    assert!(output.contains("{id: 1, first_name: Ama, last_name: Mensah"));
    assert!(output.contains(NOT_FOUND));
    assert!(output.contains("Enter new hometown or press Enter to keep 'Accra': "));
    assert!(output.contains(&updated_message("1")));
    assert!(output.contains(DELETE_NOT_FOUND));
    assert!(output.contains(&deleted_message("1")));
    assert!(output.contains(NO_PATIENTS));
    assert!(output.trim_end().ends_with(EXITING));

    let stored = std::fs::read_to_string(dir.path().join("patients.json")).unwrap();
    assert_eq!(stored.trim(), "[]");
}

#[test]
fn test_unknown_storage_defaults_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let script = format!("yaml\n{}6\n", ADD_AMA);

    let (kind, output) = run_session(dir.path(), &script);

    assert_eq!(kind, StorageKind::Csv);
    assert!(output.starts_with(STORAGE_PROMPT));
    assert!(output.contains(INVALID_STORAGE));
    let stored = std::fs::read_to_string(dir.path().join("patients.csv")).unwrap();
    assert!(stored.contains("1,Ama,Mensah,01-01-2000,"));
}

#[test]
fn test_invalid_choice_reprompts() {
    let dir = tempfile::tempdir().unwrap();

    let (_, output) = run_session(dir.path(), "csv\n0\nabc\n6\n");

    assert_eq!(output.matches(INVALID_CHOICE).count(), 2);
    assert_eq!(output.matches(CHOICE_PROMPT).count(), 3);
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();

    // Input ends in the middle of adding a patient.
    let (_, output) = run_session(dir.path(), "csv\n1\nAma\n");

    assert!(output.contains("Last Name: "));
    assert!(!dir.path().join("patients.csv").exists());
}

#[test]
fn test_operation_error_keeps_menu_running() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("patients.json"), "{broken").unwrap();

    let (_, output) = run_session(dir.path(), "json\n2\n6\n");

    assert!(output.contains("Error: Storage error: JSON serialization error"));
    assert!(output.trim_end().ends_with(EXITING));
}

#[test]
fn test_rejected_date_is_not_echoed() {
    let dir = tempfile::tempdir().unwrap();
    let script = "csv\n1\nAma\nMensah\n30-02-2024\n01-01-2000\nAccra\n12B\n024-000-0000\n6\n";

    let (_, output) = run_session(dir.path(), script);

    assert_eq!(
        output
            .matches("Invalid date format or date. Please try again.")
            .count(),
        1
    );
    assert!(!output.contains("30-02-2024"));
    assert!(output.contains(&added_message("1")));
}

#[test]
fn test_binary_keeps_stderr_quiet() {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("patients.json"), "{broken").unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_patient-records"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"json\n2\n6\n")
        .unwrap();

    let result = child.wait_with_output().unwrap();
    let stdout = String::from_utf8(result.stdout).unwrap();

    assert!(result.status.success());
    assert_eq!(stdout.matches("Error: ").count(), 1);
    assert!(result.stderr.is_empty());
}

#[test]
fn test_new_file_notice() {
    let dir = tempfile::tempdir().unwrap();
    let script = format!("csv\n2\n{}2\n6\n", ADD_AMA);

    let (_, output) = run_session(dir.path(), &script);

    // Once for the first listing, once for the add; none after the file exists.
    assert_eq!(output.matches(NEW_FILE_NOTICE).count(), 2);
    let listed = output.find(NO_PATIENTS).unwrap();
    assert!(output.find(NEW_FILE_NOTICE).unwrap() < listed);
    let added = output.find(&added_message("1")).unwrap();
    assert!(output.rfind(NEW_FILE_NOTICE).unwrap() < added);
    assert!(output.rfind(NEW_FILE_NOTICE).unwrap() > output.find("Phone Number").unwrap());
}
