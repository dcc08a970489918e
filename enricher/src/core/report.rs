//! Audit report of an enrichment run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::WorkItem;
use uuid::Uuid;

/// What happened to one selected row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum RowOutcome {
    /// Code written to the target cell
    Filled(String),
    /// The registry answered but had no code; the cell stays blank
    NoCode,
    /// The lookup failed; the cell stays blank
    LookupFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedRow {
    #[serde(flatten)]
    pub item: WorkItem,
    #[serde(flatten)]
    pub outcome: RowOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub sheet: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub rows: Vec<ProcessedRow>,
}

impl RunReport {
    pub fn start(sheet: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            sheet: sheet.into(),
            started_at: Utc::now(),
            finished_at: None,
            rows: Vec::new(),
        }
    }

    pub fn record(&mut self, item: WorkItem, outcome: RowOutcome) {
        self.rows.push(ProcessedRow { item, outcome });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Processed `(line, identifier)` pairs in processing order
    pub fn audit_trail(&self) -> impl Iterator<Item = &WorkItem> {
        self.rows.iter().map(|row| &row.item)
    }

    pub fn processed(&self) -> usize {
        self.rows.len()
    }

    pub fn filled(&self) -> usize {
        self.count(|outcome| matches!(outcome, RowOutcome::Filled(_)))
    }

    pub fn no_code(&self) -> usize {
        self.count(|outcome| matches!(outcome, RowOutcome::NoCode))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, RowOutcome::LookupFailed(_)))
    }

    fn count(&self, predicate: impl Fn(&RowOutcome) -> bool) -> usize {
        self.rows.iter().filter(|row| predicate(&row.outcome)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut report = RunReport::start("Лист1");
        report.record(WorkItem::new(2, "111"), RowOutcome::Filled("16".into()));
        report.record(WorkItem::new(3, "222"), RowOutcome::NoCode);
        report.record(WorkItem::new(5, "333"), RowOutcome::LookupFailed("HTTP 500".into()));
        report.finish();

        assert_eq!(report.processed(), 3);
        assert_eq!(report.filled(), 1);
        assert_eq!(report.no_code(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.finished_at.is_some());

        let lines: Vec<u32> = report.audit_trail().map(|item| item.line).collect();
        assert_eq!(lines, vec![2, 3, 5]);
    }

    #[test]
    fn test_json_shape() {
        let mut report = RunReport::start("Sheet1");
        report.record(WorkItem::new(2, "111"), RowOutcome::Filled("16".into()));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json["rows"][0],
            serde_json::json!({"line": 2, "identifier": "111", "outcome": "filled", "detail": "16"})
        );
    }
}
