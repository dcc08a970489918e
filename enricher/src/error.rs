//! Enricher-specific error types

use registry::LookupError;
use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnricherError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Workbook store error: {message}")]
    Store { message: String },

    #[error("Workbook error: {0}")]
    Workbook(#[from] umya_spreadsheet::XlsxError),

    #[error("Registry client error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EnricherError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

pub type EnricherResult<T> = Result<T, EnricherError>;
