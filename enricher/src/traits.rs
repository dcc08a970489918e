//! Trait definitions with mockall annotations for testing
//!
//! The enricher talks to the registry through `registry::RegistryClient` and
//! to the spreadsheet through [`TabularStore`]; both are injected so the run
//! loop can be tested without a network or a file.

use shared::CellValue;

use crate::error::EnricherResult;

/// Sheet-oriented tabular store with 1-based row and column addressing
#[mockall::automock]
pub trait TabularStore: Send {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Make `name` the sheet that `cell`, `set_cell` and `max_row` operate on
    fn select_sheet(&mut self, name: &str) -> EnricherResult<()>;

    fn active_sheet(&self) -> String;

    /// Last row holding a value on the active sheet, 0 for an empty sheet
    fn max_row(&self) -> u32;

    fn cell(&self, row: u32, column: u32) -> CellValue;

    /// Write a text value, or clear the cell with `None`
    fn set_cell(&mut self, row: u32, column: u32, value: Option<String>) -> EnricherResult<()>;

    /// Persist every sheet to the backing file
    fn save(&mut self) -> EnricherResult<()>;
}
