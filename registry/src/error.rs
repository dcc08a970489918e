//! Lookup error types

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Result type for registry lookups
pub type LookupResult<T> = Result<T, LookupError>;

/// What kind of transport fault ended a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Connect,
    SecureChannel,
    Timeout,
    Other,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Connect => write!(f, "connection error"),
            TransportKind::SecureChannel => write!(f, "TLS error"),
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::Other => write!(f, "request error"),
        }
    }
}

/// Lookup failures
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Rate limited: gave up after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("Transport failure ({kind}): {message}")]
    Transport { kind: TransportKind, message: String },

    #[error("Registry returned HTTP {status}")]
    Protocol { status: u16 },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("HTTP client setup failed: {message}")]
    Client { message: String },
}

impl LookupError {
    /// Only rate limiting is worth another attempt within the same call
    pub fn is_retryable(&self) -> bool {
        matches!(self, LookupError::RateLimited { .. })
    }

    /// Operator advice for failures that configuration can fix
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            LookupError::Transport {
                kind: TransportKind::SecureChannel,
                ..
            } => Some(
                "the registry's certificate chain is often missing from default trust stores; \
                 rerun with --insecure or REGISTRY_ACCEPT_INVALID_CERTS=true",
            ),
            _ => None,
        }
    }

    /// Classify a reqwest failure that happened before a status was available
    pub fn from_transport(err: reqwest::Error) -> Self {
        let message = describe_chain(&err);

        if err.is_decode() {
            return LookupError::MalformedResponse { message };
        }

        let kind = if err.is_timeout() {
            TransportKind::Timeout
        } else if mentions_tls(&message) {
            TransportKind::SecureChannel
        } else if err.is_connect() {
            TransportKind::Connect
        } else {
            TransportKind::Other
        };

        LookupError::Transport { kind, message }
    }
}

/// Join an error and its sources into one line
fn describe_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// reqwest does not expose TLS failures as a distinct kind; the backend's
// message is the only signal.
fn mentions_tls(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["certificate", "tls", "ssl", "handshake"]
        .iter()
        .any(|needle| lower.contains(needle))
}
