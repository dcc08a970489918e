//! Service implementations
//!
//! Real implementations of the boundary code: the `.xlsx` workbook store and
//! the console prompts used to collect run parameters.

pub mod prompt;
pub mod workbook_store;

#[cfg(test)]
pub mod tests;

pub use prompt::{ConsolePrompter, resolve_sheet};
pub use workbook_store::{WorkbookStore, check_workbook_path};
