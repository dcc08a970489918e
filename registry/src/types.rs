//! Registry request/response types and client configuration

use serde::{Deserialize, Serialize};
use shared::{SharedError, SharedResult, parse_env};
use std::time::Duration;
use url::Url;

/// Organization search endpoint of the statistics registry
pub const DEFAULT_ENDPOINT: &str = "https://websbor.rosstat.gov.ru/webstat/api/gs/organizations";

/// JSON field carrying the identifier in the request body
pub const DEFAULT_IDENTIFIER_FIELD: &str = "inn";

pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(7500);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Decoded registry response, kept opaque until extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupResponse {
    pub body: serde_json::Value,
}

impl LookupResponse {
    pub fn new(body: serde_json::Value) -> Self {
        Self { body }
    }

    /// Records of a well-formed (array) response
    pub fn records(&self) -> Option<&[serde_json::Value]> {
        self.body.as_array().map(Vec::as_slice)
    }
}

impl From<serde_json::Value> for LookupResponse {
    fn from(body: serde_json::Value) -> Self {
        Self::new(body)
    }
}

/// Fixed-delay retry policy for rate-limited lookups.
///
/// A lookup issues at most `max_retries + 1` requests. The delay is the same
/// before every retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Total number of requests a single lookup may issue
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY)
    }
}

/// Registry client configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub endpoint: Url,
    pub identifier_field: String,
    pub retry: RetryPolicy,
    pub request_timeout: Duration,
    /// The registry's certificate chain is not in every default trust store
    pub accept_invalid_certs: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            identifier_field: DEFAULT_IDENTIFIER_FIELD.to_string(),
            retry: RetryPolicy::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            accept_invalid_certs: false,
        }
    }
}

impl RegistryConfig {
    /// Point the client at another endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> SharedResult<Self> {
        self.endpoint = parse_endpoint("endpoint", endpoint)?;
        Ok(self)
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables (all optional):
    /// - REGISTRY_ENDPOINT: lookup URL
    /// - REGISTRY_IDENTIFIER_FIELD: request body field name (default: inn)
    /// - LOOKUP_MAX_RETRIES: retries on HTTP 429 (default: 5)
    /// - LOOKUP_RETRY_DELAY_MS: fixed wait before each retry (default: 7500)
    /// - LOOKUP_TIMEOUT_MS: per-request timeout (default: 60000)
    /// - REGISTRY_ACCEPT_INVALID_CERTS: skip TLS certificate verification
    pub fn from_env() -> SharedResult<Self> {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var("REGISTRY_ENDPOINT") {
            config.endpoint = parse_endpoint("REGISTRY_ENDPOINT", &endpoint)?;
        }
        if let Ok(field) = std::env::var("REGISTRY_IDENTIFIER_FIELD") {
            let field = field.trim();
            if field.is_empty() {
                return Err(SharedError::invalid_config("REGISTRY_IDENTIFIER_FIELD", field));
            }
            config.identifier_field = field.to_string();
        }
        if let Some(max_retries) = parse_env::<u32>("LOOKUP_MAX_RETRIES")? {
            config.retry.max_retries = max_retries;
        }
        if let Some(delay_ms) = parse_env::<u64>("LOOKUP_RETRY_DELAY_MS")? {
            config.retry.retry_delay = Duration::from_millis(delay_ms);
        }
        if let Some(timeout_ms) = parse_env::<u64>("LOOKUP_TIMEOUT_MS")? {
            config.request_timeout = Duration::from_millis(timeout_ms);
        }
        if let Some(accept) = parse_env::<bool>("REGISTRY_ACCEPT_INVALID_CERTS")? {
            config.accept_invalid_certs = accept;
        }

        Ok(config)
    }
}

fn parse_endpoint(field: &str, raw: &str) -> SharedResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|_| SharedError::invalid_config(field, raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(SharedError::invalid_config(field, raw)),
    }
}
