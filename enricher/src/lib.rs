//! Spreadsheet enrichment library
//!
//! Reads identifiers from one column of a workbook, looks each one up in the
//! organization registry and writes the returned classification code into
//! another column, saving after every row so an interrupted run can resume.

pub mod config;
pub mod core;
pub mod enricher;
pub mod error;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use config::EnrichmentSettings;
pub use crate::core::{ProcessedRow, RowOutcome, RunReport, SelectionRange, select_work_items};
pub use enricher::Enricher;
pub use error::{EnricherError, EnricherResult};
pub use services::{ConsolePrompter, WorkbookStore, check_workbook_path, resolve_sheet};
pub use traits::*;
