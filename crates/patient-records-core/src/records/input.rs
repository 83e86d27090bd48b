//! Operator input used by the interactive add and update flows.

use std::io;

/// Line-oriented source of operator answers.
///
/// Implemented by the console front-end; tests supply scripted answers.
pub trait PatientInput {
    /// Show `prompt` and read one line without its terminator.
    /// Returns `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Tell the operator an answer was rejected.
    fn warn(&mut self, message: &str);
}

impl<T: PatientInput + ?Sized> PatientInput for &mut T {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).read_line(prompt)
    }

    fn warn(&mut self, message: &str) {
        (**self).warn(message)
    }
}
