//! Interactive operator prompts
//!
//! Every question is asked again until the answer is valid. Running out of
//! input is a configuration error so piped or closed stdin cannot loop.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::core::selector::MAX_COLUMN;
use crate::error::{EnricherError, EnricherResult};
use crate::services::workbook_store::check_workbook_path;

/// Resolve a sheet given by name, or by 1-based position when no sheet
/// carries that name
pub fn resolve_sheet(names: &[String], requested: &str) -> EnricherResult<String> {
    let requested = requested.trim();
    if let Some(name) = names.iter().find(|name| name.as_str() == requested) {
        return Ok(name.clone());
    }
    requested
        .parse::<usize>()
        .ok()
        .filter(|index| (1..=names.len()).contains(index))
        .map(|index| names[index - 1].clone())
        .ok_or_else(|| EnricherError::config(format!("no sheet '{requested}' in the workbook")))
}

/// Asks the operator for run parameters on a line-based console
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Path to an existing `.xlsx` workbook
    pub fn ask_workbook_path(&mut self) -> EnricherResult<PathBuf> {
        loop {
            let answer = self.ask("Enter the path to the .xlsx file: ")?;
            let path = PathBuf::from(answer.trim_matches(|c| c == '"' || c == '\''));
            match check_workbook_path(&path) {
                Ok(()) => return Ok(path),
                Err(err) => self.say(&format!("{err}. Try again."))?,
            }
        }
    }

    /// Pick a sheet from a numbered list
    pub fn ask_sheet(&mut self, names: &[String]) -> EnricherResult<String> {
        if names.is_empty() {
            return Err(EnricherError::config("workbook has no sheets to choose from"));
        }

        self.say("Available sheets:")?;
        for (index, name) in names.iter().enumerate() {
            self.say(&format!("  {}. {}", index + 1, name))?;
        }

        let prompt = format!("Select a sheet (1-{}): ", names.len());
        let index = self.ask_number(&prompt, 1, names.len() as u32)?;
        Ok(names[(index - 1) as usize].clone())
    }

    /// 1-based column number
    pub fn ask_column(&mut self, label: &str) -> EnricherResult<u32> {
        self.ask_number(&format!("Enter the {label} column number: "), 1, MAX_COLUMN)
    }

    /// 1-based line number no greater than `max_row`
    pub fn ask_line(&mut self, label: &str, max_row: u32) -> EnricherResult<u32> {
        if max_row == 0 {
            return Err(EnricherError::config("the selected sheet is empty"));
        }
        self.ask_number(&format!("Enter the {label} line (1-{max_row}): "), 1, max_row)
    }

    fn ask_number(&mut self, prompt: &str, min: u32, max: u32) -> EnricherResult<u32> {
        loop {
            let answer = self.ask(prompt)?;
            match answer.parse::<u32>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                _ => self.say(&format!("Enter a whole number from {min} to {max}."))?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> EnricherResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EnricherError::config("input ended before all parameters were given"));
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) -> EnricherResult<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}
