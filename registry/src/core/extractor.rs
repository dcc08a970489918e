//! Classification code extraction from registry responses

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::LookupResponse;

/// Nested object that carries the ownership-form classification
pub const DEFAULT_RECORD_KEY: &str = "okfs";
pub const DEFAULT_CODE_FIELD: &str = "code";

/// Response shape problems found while scanning
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("response is not a list of records")]
    NotAList,

    #[error("record {index} is not an object")]
    RecordNotObject { index: usize },

    #[error("record {index}: '{key}' is not an object")]
    NestedNotObject { index: usize, key: String },
}

/// Pulls the first code out of a list of organization records
#[derive(Debug, Clone)]
pub struct CodeExtractor {
    record_key: String,
    code_field: String,
}

impl CodeExtractor {
    /// Extractor for `record.okfs.code`
    pub fn new() -> Self {
        Self::with_fields(DEFAULT_RECORD_KEY, DEFAULT_CODE_FIELD)
    }

    /// Extractor for `record.<record_key>.<code_field>`
    pub fn with_fields(record_key: impl Into<String>, code_field: impl Into<String>) -> Self {
        Self {
            record_key: record_key.into(),
            code_field: code_field.into(),
        }
    }

    /// First non-empty code, or `None`.
    ///
    /// Shape problems and responses without any code are logged and reported
    /// as absence.
    pub fn extract_code(&self, response: &LookupResponse) -> Option<String> {
        match self.try_extract_code(response) {
            Ok(Some(code)) => Some(code),
            Ok(None) => {
                warn!(
                    "'{}' not found in any '{}' field",
                    self.code_field, self.record_key
                );
                None
            }
            Err(failure) => {
                warn!(error = %failure, "Error parsing registry response");
                None
            }
        }
    }

    /// Scan records in order; the first record with a code wins and the rest
    /// are never inspected.
    pub fn try_extract_code(&self, response: &LookupResponse) -> Result<Option<String>, ParseFailure> {
        let records = response.records().ok_or(ParseFailure::NotAList)?;

        for (index, record) in records.iter().enumerate() {
            let record = record
                .as_object()
                .ok_or(ParseFailure::RecordNotObject { index })?;

            let nested = match record.get(&self.record_key) {
                None | Some(Value::Null) => continue,
                Some(Value::Object(nested)) => nested,
                Some(_) => {
                    return Err(ParseFailure::NestedNotObject {
                        index,
                        key: self.record_key.clone(),
                    })
                }
            };

            if let Some(code) = nested.get(&self.code_field).and_then(code_text) {
                debug!(record = index, code = %code, "Found code");
                return Ok(Some(code));
            }
        }

        Ok(None)
    }
}

impl Default for CodeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn code_text(value: &Value) -> Option<String> {
    match value {
        Value::String(code) if !code.is_empty() => Some(code.clone()),
        Value::Number(code) => Some(code.to_string()),
        _ => None,
    }
}
