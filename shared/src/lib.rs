//! Shared types for the registry enrichment workspace
//!
//! Contains only the types that cross crate boundaries: the work queue
//! entries handed from the row selector to the lookup pipeline, spreadsheet
//! cell values, the shared configuration error and tracing setup.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
