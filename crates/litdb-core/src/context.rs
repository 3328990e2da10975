//! Per-run mutable state passed through extraction

use crate::sections::SectionLog;
use crate::stats::RunStats;

/// Explicit run-scoped state: statistics plus the section-label log.
///
/// Owned by the pipeline driver and passed `&mut` into extraction, so
/// the extractors stay testable without a live database connection.
#[derive(Debug, Default)]
pub struct RunContext {
    pub stats: RunStats,
    pub sections: SectionLog,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }
}
