//! Core business logic modules
//!
//! Row selection and run reporting. Nothing here performs I/O; the store is
//! only read through the `TabularStore` trait.

pub mod report;
pub mod selector;

pub use report::{ProcessedRow, RowOutcome, RunReport};
pub use selector::{SelectionRange, select_work_items};
