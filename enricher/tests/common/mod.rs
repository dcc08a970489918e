//! Common test utilities and infrastructure
//!
//! Shared fixtures, an in-memory store and an enricher builder used across
//! the enricher test suites.

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
#[allow(unused_imports)]
pub use fixtures::TestFixtures;
#[allow(unused_imports)]
pub use helpers::{EnricherBuilder, MemoryStore, TestEnricher};
