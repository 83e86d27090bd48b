//! Line-oriented console over any reader and writer.

use std::io::{self, BufRead, Write};

use patient_records_core::PatientInput;

/// Console front-end: prompts on `writer`, answers from `reader`.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print one line.
    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message)
    }

    /// Show `prompt` and read an answer. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Consume the console, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> PatientInput for Console<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.ask(prompt)
    }

    fn warn(&mut self, message: &str) {
        if let Err(e) = self.say(message) {
            log::error!("Failed to write warning: {}", e);
        }
    }
}
