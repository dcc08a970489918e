//! Registry lookup library
//!
//! This library talks to the remote organization registry: it sends one
//! identifier lookup at a time with a bounded, fixed-delay retry on rate
//! limiting, and extracts the classification code from the loosely
//! structured response.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use crate::core::{CodeExtractor, ParseFailure};
pub use error::{LookupError, LookupResult, TransportKind};
pub use services::RealRegistryClient;
pub use traits::*;
pub use types::*;
