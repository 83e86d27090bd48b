//! Numbered menu and dispatch loop.

use std::io::{self, BufRead, Write};

use log::{debug, info};
use patient_records_core::{
    PatientRecords, RecordStore, RecordsError, RecordsResult, StorageKind,
};

use crate::console::Console;
use crate::prompts::*;

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Search,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    /// Parse an answer to the menu prompt. Only `1` through `6` are accepted.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::Search),
            "4" => Some(MenuChoice::Update),
            "5" => Some(MenuChoice::Delete),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Ask for the storage backend. Anything other than `csv` or `json` falls
/// back to CSV with a warning.
pub fn select_storage<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<StorageKind> {
    let answer = console.ask(STORAGE_PROMPT)?.unwrap_or_default();
    match answer.parse::<StorageKind>() {
        Ok(kind) => Ok(kind),
        Err(e) => {
            info!("{}", e);
            console.say(INVALID_STORAGE)?;
            Ok(StorageKind::Csv)
        }
    }
}

/// Run the menu until the operator exits or input ends.
///
/// Operation failures are reported and the menu continues; only console I/O
/// failures end the loop with an error.
pub fn run<S, R, W>(records: &PatientRecords<S>, console: &mut Console<R, W>) -> io::Result<()>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    loop {
        console.say(MENU)?;
        let answer = match console.ask(CHOICE_PROMPT)? {
            Some(answer) => answer,
            None => break,
        };
        let choice = match MenuChoice::parse(&answer) {
            Some(choice) => choice,
            None => {
                console.say(INVALID_CHOICE)?;
                continue;
            }
        };

        match dispatch(records, console, choice) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(RecordsError::InputClosed) => break,
            Err(RecordsError::Input(e)) => return Err(e),
            Err(e) => {
                // The operator already sees the message below.
                debug!("{:?} failed: {}", choice, e);
                console.say(&format!("Error: {}", e))?;
            }
        }
    }
    Ok(())
}

fn dispatch<S, R, W>(
    records: &PatientRecords<S>,
    console: &mut Console<R, W>,
    choice: MenuChoice,
) -> RecordsResult<Flow>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    // Every operation except Exit reads the store first.
    let fresh = choice != MenuChoice::Exit && !records.has_backing_file();
    if fresh && choice != MenuChoice::Add {
        console.say(NEW_FILE_NOTICE)?;
    }

    match choice {
        MenuChoice::Add => {
            let patient = records.add(console)?;
            if fresh {
                console.say(NEW_FILE_NOTICE)?;
            }
            console.say(&added_message(&patient.id))?;
        }
        MenuChoice::List => {
            let patients = records.list_all()?;
            if patients.is_empty() {
                console.say(NO_PATIENTS)?;
            }
            for patient in patients {
                console.say(&patient.to_string())?;
            }
        }
        MenuChoice::Search => {
            let id = ask_id(console, SEARCH_PROMPT)?;
            match records.search_by_id(&id)? {
                Some(patient) => console.say(&patient.to_string())?,
                None => console.say(NOT_FOUND)?,
            }
        }
        MenuChoice::Update => {
            let id = ask_id(console, UPDATE_PROMPT)?;
            if records.update_by_id(&id, console)? {
                console.say(&updated_message(&id))?;
            } else {
                console.say(NOT_FOUND)?;
            }
        }
        MenuChoice::Delete => {
            let id = ask_id(console, DELETE_PROMPT)?;
            if records.delete_by_id(&id)? {
                console.say(&deleted_message(&id))?;
            } else {
                console.say(DELETE_NOT_FOUND)?;
            }
        }
        MenuChoice::Exit => {
            console.say(EXITING)?;
            return Ok(Flow::Exit);
        }
    }
    Ok(Flow::Continue)
}

fn ask_id<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
) -> RecordsResult<String> {
    console.ask(prompt)?.ok_or(RecordsError::InputClosed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse(" 1"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_select_storage() {
        let mut console = Console::new(Cursor::new("JSON\n"), Vec::new());
        assert_eq!(select_storage(&mut console).unwrap(), StorageKind::Json);

        let mut console = Console::new(Cursor::new("xml\n"), Vec::new());
        assert_eq!(select_storage(&mut console).unwrap(), StorageKind::Csv);
        let output = String::from_utf8(console.into_writer()).unwrap();
        assert!(output.contains(INVALID_STORAGE));

        let mut console = Console::new(Cursor::new(" json \n"), Vec::new());
        assert_eq!(select_storage(&mut console).unwrap(), StorageKind::Csv);

        let mut console = Console::new(Cursor::new(""), Vec::new());
        assert_eq!(select_storage(&mut console).unwrap(), StorageKind::Csv);
    }
}
