//! Interactive console front-end for the patient records manager.
//!
//! The operator picks a storage backend once at startup, then drives
//! add / list / search / update / delete from a numbered menu.

pub mod console;
pub mod menu;
pub mod prompts;

pub use console::Console;
pub use menu::{run, select_storage, MenuChoice};
