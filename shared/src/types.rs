//! Core shared types: work queue entries, cell values and env helpers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{SharedError, SharedResult};

/// A single row queued for enrichment: its 1-based line and the identifier
/// read from the source column.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkItem {
    pub line: u32,
    pub identifier: String,
}

impl WorkItem {
    pub fn new(line: u32, identifier: impl Into<String>) -> Self {
        Self {
            line,
            identifier: identifier.into(),
        }
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?})", self.line, self.identifier)
    }
}

/// Value held by a spreadsheet cell
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Empty cells and whitespace-only text count as blank
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) | CellValue::Bool(_) => false,
        }
    }

    /// Render the cell as a lookup identifier.
    ///
    /// Identifiers typed into a spreadsheet usually end up stored as numbers,
    /// so integral numbers are rendered without a fractional part.
    pub fn as_identifier(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        match self {
            CellValue::Empty => None,
            CellValue::Text(text) => Some(text.trim().to_string()),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map(CellValue::Text).unwrap_or(CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// Read an optional environment variable and parse it.
///
/// Returns `Ok(None)` when the variable is unset, and an `InvalidConfig`
/// error naming the variable when it is set but cannot be parsed.
pub fn parse_env<T: FromStr>(key: &str) -> SharedResult<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| SharedError::invalid_config(key, raw)),
        Err(_) => Ok(None),
    }
}
