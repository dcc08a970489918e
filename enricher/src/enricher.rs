//! Sequential enrichment loop
//!
//! Walks the selected rows one at a time: look the identifier up, extract the
//! code, write it into the target cell and save the workbook before moving on.
//! Saving after every row means an interrupted run loses at most the row in
//! flight, and a rerun selects only the rows that are still blank.

use registry::RegistryClient;
use shared::{WorkItem, logging};
use tracing::{debug, info, warn};

use crate::config::EnrichmentSettings;
use crate::core::{RowOutcome, RunReport, SelectionRange, select_work_items};
use crate::error::{EnricherError, EnricherResult};
use crate::traits::TabularStore;

/// Fills the target column of a store from registry lookups
pub struct Enricher<C, S>
where
    C: RegistryClient,
    S: TabularStore,
{
    client: C,
    store: S,
    settings: EnrichmentSettings,
}

impl<C, S> Enricher<C, S>
where
    C: RegistryClient,
    S: TabularStore,
{
    pub fn new(client: C, store: S, settings: EnrichmentSettings) -> Self {
        Self {
            client,
            store,
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Process every unfinished row of `range` on the active sheet.
    ///
    /// Lookup failures are recorded per row and do not stop the run. A failed
    /// save does, because later rows could no longer be recovered from disk.
    pub async fn run(&mut self, range: &SelectionRange) -> EnricherResult<RunReport> {
        let mut report = RunReport::start(self.store.active_sheet());
        let items = select_work_items(&self.store, range)?;
        let total = items.len();

        logging::log_progress(
            "Enrichment",
            &format!(
                "{} rows to process on sheet '{}' (lines {}..={})",
                total, report.sheet, range.start_line, range.end_line
            ),
        );

        for (index, item) in items.into_iter().enumerate() {
            let outcome = self.process_row(&item, range.target_column).await?;
            info!(
                "[{}/{}] line {} ({}): {}",
                index + 1,
                total,
                item.line,
                item.identifier,
                describe(&outcome)
            );
            report.record(item, outcome);

            if index + 1 < total && !self.settings.pacing_delay.is_zero() {
                debug!(delay = ?self.settings.pacing_delay, "Pacing before next lookup");
                tokio::time::sleep(self.settings.pacing_delay).await;
            }
        }

        self.save("final save")?;
        report.finish();

        logging::log_success(&format!(
            "Run {} complete: {} processed, {} filled, {} without code, {} failed",
            report.run_id,
            report.processed(),
            report.filled(),
            report.no_code(),
            report.failed()
        ));
        for item in report.audit_trail() {
            debug!(line = item.line, identifier = %item.identifier, "Processed");
        }

        Ok(report)
    }

    async fn process_row(&mut self, item: &WorkItem, target_column: u32) -> EnricherResult<RowOutcome> {
        let outcome = match self.client.lookup(&item.identifier).await {
            Ok(response) => match self.settings.extractor.extract_code(&response) {
                Some(code) => {
                    self.store
                        .set_cell(item.line, target_column, Some(code.clone()))?;
                    RowOutcome::Filled(code)
                }
                None => RowOutcome::NoCode,
            },
            Err(err) => {
                warn!(line = item.line, identifier = %item.identifier, error = %err, "Lookup failed, leaving row blank");
                if let Some(hint) = err.hint() {
                    warn!("{hint}");
                }
                RowOutcome::LookupFailed(err.to_string())
            }
        };

        self.save(&format!("save after line {}", item.line))?;
        Ok(outcome)
    }

    fn save(&mut self, context: &str) -> EnricherResult<()> {
        self.store.save().map_err(|err| {
            logging::log_error(context, &err);
            match err {
                EnricherError::Store { .. } => err,
                other => EnricherError::store(format!("{context}: {other}")),
            }
        })
    }
}

fn describe(outcome: &RowOutcome) -> String {
    match outcome {
        RowOutcome::Filled(code) => format!("code {code}"),
        RowOutcome::NoCode => "no code found".to_string(),
        RowOutcome::LookupFailed(reason) => format!("lookup failed: {reason}"),
    }
}
