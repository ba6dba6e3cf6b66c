// Line-oriented prompts over any reader/writer pair

use crate::error::TaxError;
use crate::models::parse_location_flag;
use colored::Colorize;
use std::io::{BufRead, Write};

/// Reads one answer per line; the only place user input is parsed
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for report tables and messages
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> Result<(), TaxError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn success(&mut self, text: &str) -> Result<(), TaxError> {
        writeln!(self.output, "{}", text.green())?;
        Ok(())
    }

    /// Report a recoverable error the way the menu shows it
    pub fn error(&mut self, err: &TaxError) -> Result<(), TaxError> {
        writeln!(self.output, "{} {}", "Error:".red().bold(), err)?;
        Ok(())
    }

    /// Print `label` and read one trimmed line
    pub fn prompt(&mut self, label: &str) -> Result<String, TaxError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TaxError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Read a whole number; anything else is discarded with `InvalidInputType`
    pub fn prompt_int(&mut self, label: &str) -> Result<i64, TaxError> {
        let answer = self.prompt(label)?;
        answer.parse().map_err(|_| TaxError::InvalidInputType {
            expected: "a whole number",
            input: answer,
        })
    }

    /// Read a Y/N answer
    pub fn prompt_location(&mut self, label: &str) -> Result<bool, TaxError> {
        let answer = self.prompt(label)?;
        parse_location_flag(&answer).ok_or(TaxError::InvalidInputType {
            expected: "Y or N",
            input: answer,
        })
    }
}
