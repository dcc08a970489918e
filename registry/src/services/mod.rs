//! Registry service implementations

pub mod lookup_client;

#[cfg(test)]
pub mod tests;

pub use lookup_client::*;
