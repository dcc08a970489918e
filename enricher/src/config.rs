//! Run settings for the enrichment loop

use std::time::Duration;

use registry::CodeExtractor;
use shared::{SharedResult, parse_env};

/// Default wait between two consecutive lookups
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(7500);

/// Settings that shape a run independent of the selected rows
#[derive(Debug, Clone)]
pub struct EnrichmentSettings {
    /// Wait after each processed row, skipped after the last one
    pub pacing_delay: Duration,
    pub extractor: CodeExtractor,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            pacing_delay: DEFAULT_PACING_DELAY,
            extractor: CodeExtractor::new(),
        }
    }
}

impl EnrichmentSettings {
    pub fn with_pacing_delay(mut self, pacing_delay: Duration) -> Self {
        self.pacing_delay = pacing_delay;
        self
    }

    pub fn with_extractor(mut self, extractor: CodeExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Load settings from environment variables
    ///
    /// Environment variables (all optional):
    /// - REQUEST_PACING_MS: wait between rows (default: 7500)
    pub fn from_env() -> SharedResult<Self> {
        let mut settings = Self::default();
        if let Some(pacing_ms) = parse_env::<u64>("REQUEST_PACING_MS")? {
            settings.pacing_delay = Duration::from_millis(pacing_ms);
        }
        Ok(settings)
    }
}
