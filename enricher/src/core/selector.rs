//! Row selection
//!
//! Decides which rows of the active sheet still need a lookup: the source
//! cell holds an identifier and the target cell is still blank. Rows that
//! already have a value in the target column are never overwritten, so a
//! selection made after an interrupted run only returns unfinished rows.

use serde::{Deserialize, Serialize};
use shared::WorkItem;
use tracing::debug;

use crate::error::{EnricherError, EnricherResult};
use crate::traits::TabularStore;

/// Last row of an xlsx worksheet
pub const MAX_ROW: u32 = 1_048_576;
/// Last column of an xlsx worksheet (`XFD`)
pub const MAX_COLUMN: u32 = 16_384;

/// Column pair and inclusive line range to enrich, all 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub source_column: u32,
    pub target_column: u32,
    pub start_line: u32,
    pub end_line: u32,
}

impl SelectionRange {
    pub fn new(source_column: u32, target_column: u32, start_line: u32, end_line: u32) -> Self {
        Self {
            source_column,
            target_column,
            start_line,
            end_line,
        }
    }

    /// Check the range against a sheet holding `max_row` rows
    pub fn validate(&self, max_row: u32) -> EnricherResult<()> {
        if self.source_column == 0 || self.target_column == 0 {
            return Err(EnricherError::config("column numbers start at 1"));
        }
        if self.source_column > MAX_COLUMN || self.target_column > MAX_COLUMN {
            return Err(EnricherError::config(format!(
                "column numbers end at {MAX_COLUMN}"
            )));
        }
        if self.source_column == self.target_column {
            return Err(EnricherError::config(format!(
                "source and target column are both {}",
                self.source_column
            )));
        }
        if self.start_line == 0 {
            return Err(EnricherError::config("line numbers start at 1"));
        }
        if self.start_line > self.end_line {
            return Err(EnricherError::config(format!(
                "start line {} is after end line {}",
                self.start_line, self.end_line
            )));
        }
        if self.end_line > max_row {
            return Err(EnricherError::config(format!(
                "end line {} is past the last row {}",
                self.end_line, max_row
            )));
        }
        Ok(())
    }

    pub fn line_count(&self) -> u32 {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// Collect the rows of `range` that need enrichment, in sheet order
pub fn select_work_items<S>(store: &S, range: &SelectionRange) -> EnricherResult<Vec<WorkItem>>
where
    S: TabularStore + ?Sized,
{
    range.validate(store.max_row())?;

    let mut items = Vec::new();
    for line in range.start_line..=range.end_line {
        let source = store.cell(line, range.source_column);
        let Some(identifier) = source.as_identifier() else {
            debug!(line, "Skipping row: source cell is blank");
            continue;
        };

        if !store.cell(line, range.target_column).is_blank() {
            debug!(line, identifier = %identifier, "Skipping row: target cell already filled");
            continue;
        }

        items.push(WorkItem::new(line, identifier));
    }

    debug!(
        selected = items.len(),
        scanned = range.line_count(),
        "Row selection complete"
    );
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockTabularStore;
    use shared::CellValue;
    use std::collections::HashMap;

    /// Read-only mock backed by a fixed grid
    fn grid_store(cells: Vec<((u32, u32), CellValue)>, max_row: u32) -> MockTabularStore {
        let grid: HashMap<(u32, u32), CellValue> = cells.into_iter().collect();
        let mut store = MockTabularStore::new();
        store.expect_max_row().return_const(max_row);
        store
            .expect_cell()
            .returning(move |row, column| grid.get(&(row, column)).cloned().unwrap_or_default());
        store
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn test_selects_only_unfinished_rows() {
        let store = grid_store(
            vec![
                ((1, 1), text("ИНН")),
                ((1, 2), text("ОКФС")),
                ((2, 1), text("111")),
                ((3, 1), text("222")),
                ((3, 2), text("5")),
            ],
            4,
        );

        let items = select_work_items(&store, &SelectionRange::new(1, 2, 2, 4)).unwrap();
        assert_eq!(items, vec![WorkItem::new(2, "111")]);
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let store = grid_store(
            vec![
                ((1, 1), text("  ")),
                ((2, 1), text("222")),
                ((2, 2), text(" ")),
            ],
            2,
        );

        let items = select_work_items(&store, &SelectionRange::new(1, 2, 1, 2)).unwrap();
        assert_eq!(items, vec![WorkItem::new(2, "222")]);
    }

    #[test]
    fn test_numeric_identifiers() {
        let store = grid_store(vec![((5, 3), CellValue::Number(7701234567.0))], 5);

        let items = select_work_items(&store, &SelectionRange::new(3, 4, 5, 5)).unwrap();
        assert_eq!(items, vec![WorkItem::new(5, "7701234567")]);
    }

    #[test]
    fn test_order_follows_rows() {
        let store = grid_store(
            vec![((4, 1), text("d")), ((2, 1), text("b")), ((3, 1), text("c"))],
            4,
        );

        let items = select_work_items(&store, &SelectionRange::new(1, 2, 1, 4)).unwrap();
        let lines: Vec<u32> = items.iter().map(|item| item.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
    }

    #[test]
    fn test_rerun_after_partial_fill() {
        let mut cells = vec![((2, 1), text("111")), ((3, 1), text("222")), ((4, 1), text("333"))];
        let range = SelectionRange::new(1, 2, 2, 4);

        let first = select_work_items(&grid_store(cells.clone(), 4), &range).unwrap();
        assert_eq!(first.len(), 3);

        // row 2 was written before the interruption
        cells.push(((2, 2), text("16")));
        let second = select_work_items(&grid_store(cells, 4), &range).unwrap();
        assert_eq!(second, vec![WorkItem::new(3, "222"), WorkItem::new(4, "333")]);
    }

    #[test]
    fn test_invalid_ranges() {
        let cases = [
            SelectionRange::new(0, 2, 1, 2),
            SelectionRange::new(1, 0, 1, 2),
            SelectionRange::new(2, 2, 1, 2),
            SelectionRange::new(1, 2, 0, 2),
            SelectionRange::new(1, 2, 3, 2),
            SelectionRange::new(1, 2, 1, 11),
            SelectionRange::new(1, MAX_COLUMN + 1, 1, 2),
            SelectionRange::new(20_000, 2, 1, 2),
        ];
        for range in cases {
            assert!(
                matches!(range.validate(10), Err(EnricherError::Configuration { .. })),
                "{range:?} should be rejected"
            );
        }
        assert!(SelectionRange::new(1, 2, 10, 10).validate(10).is_ok());
        assert!(SelectionRange::new(1, MAX_COLUMN, 1, 10).validate(10).is_ok());
    }

    #[test]
    fn test_invalid_range_reads_no_cells() {
        let mut store = MockTabularStore::new();
        store.expect_max_row().return_const(3u32);
        store.expect_cell().never();

        let result = select_work_items(&store, &SelectionRange::new(1, 2, 2, 5));
        assert!(matches!(result, Err(EnricherError::Configuration { .. })));
    }
}
