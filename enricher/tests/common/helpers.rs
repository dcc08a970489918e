//! Test helpers and builder patterns for enricher tests
//!
//! This module provides convenient helper functions and builder patterns
//! to reduce test boilerplate and improve maintainability.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use enricher::{Enricher, EnricherError, EnricherResult, EnrichmentSettings, TabularStore};
use registry::MockRegistryClient;
use shared::CellValue;

use super::fixtures::TestFixtures;

/// In-memory single-sheet store that counts saves
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub sheet: String,
    pub cells: HashMap<(u32, u32), CellValue>,
    pub max_row: u32,
    pub saves: usize,
    /// Fail every save after this many successful ones
    pub fail_after_saves: Option<usize>,
}

impl MemoryStore {
    pub fn with_cells(cells: Vec<(u32, u32, CellValue)>) -> Self {
        let max_row = cells.iter().map(|(row, _, _)| *row).max().unwrap_or(0);
        Self {
            sheet: TestFixtures::SHEET.to_string(),
            cells: cells
                .into_iter()
                .map(|(row, column, value)| ((row, column), value))
                .collect(),
            max_row,
            ..Self::default()
        }
    }
}

impl TabularStore for MemoryStore {
    fn sheet_names(&self) -> Vec<String> {
        vec![self.sheet.clone()]
    }

    fn select_sheet(&mut self, name: &str) -> EnricherResult<()> {
        if name == self.sheet {
            Ok(())
        } else {
            Err(EnricherError::config(format!("no sheet named '{name}'")))
        }
    }

    fn active_sheet(&self) -> String {
        self.sheet.clone()
    }

    fn max_row(&self) -> u32 {
        self.max_row
    }

    fn cell(&self, row: u32, column: u32) -> CellValue {
        self.cells.get(&(row, column)).cloned().unwrap_or_default()
    }

    fn set_cell(&mut self, row: u32, column: u32, value: Option<String>) -> EnricherResult<()> {
        match value {
            Some(text) => self.cells.insert((row, column), CellValue::Text(text)),
            None => self.cells.remove(&(row, column)),
        };
        self.max_row = self.max_row.max(row);
        Ok(())
    }

    fn save(&mut self) -> EnricherResult<()> {
        if let Some(limit) = self.fail_after_saves {
            if self.saves >= limit {
                return Err(EnricherError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "workbook is locked",
                )));
            }
        }
        self.saves += 1;
        Ok(())
    }
}

/// Type alias for the enricher under test
pub type TestEnricher = Enricher<MockRegistryClient, MemoryStore>;

/// Builder pattern for creating test enrichers with sensible defaults
pub struct EnricherBuilder {
    client: MockRegistryClient,
    store: MemoryStore,
    settings: EnrichmentSettings,
}

impl EnricherBuilder {
    /// Empty sheet, no lookups expected and no pacing
    pub fn new() -> Self {
        Self {
            client: MockRegistryClient::new(),
            store: MemoryStore::with_cells(Vec::new()),
            settings: EnrichmentSettings::default().with_pacing_delay(Duration::ZERO),
        }
    }

    pub fn with_cells(mut self, cells: Vec<(u32, u32, CellValue)>) -> Self {
        self.store = MemoryStore::with_cells(cells);
        self
    }

    pub fn with_pacing(mut self, pacing_delay: Duration) -> Self {
        self.settings = self.settings.with_pacing_delay(pacing_delay);
        self
    }

    pub fn with_failing_save_after(mut self, saves: usize) -> Self {
        self.store.fail_after_saves = Some(saves);
        self
    }

    /// Configure the registry client mock with a setup function
    pub fn with_client<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockRegistryClient),
    {
        setup(&mut self.client);
        self
    }

    /// Build the enricher with the configured mock and store
    pub fn build(self) -> TestEnricher {
        Enricher::new(self.client, self.store, self.settings)
    }
}

impl Default for EnricherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
