//! Registry trait definitions for dependency injection

use async_trait::async_trait;

use crate::error::LookupResult;
use crate::types::LookupResponse;

/// Remote registry lookup with the retry policy applied inside the call
#[mockall::automock]
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Look up one identifier.
    ///
    /// Rate limiting is retried according to the client's policy; every other
    /// failure is returned after the first attempt.
    async fn lookup(&self, identifier: &str) -> LookupResult<LookupResponse>;
}
