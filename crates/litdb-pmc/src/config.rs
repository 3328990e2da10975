//! Pipeline configuration

use std::path::PathBuf;

/// Default number of rows per insert batch.
pub const DEFAULT_BATCH_SIZE: usize = 400;

/// Runtime configuration for one ingestion run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Destination SQLite database
    pub database: PathBuf,
    /// Input `.tar.gz` archive of article documents
    pub archive: PathBuf,
    /// Optional newline-delimited DOI allow-list
    pub doi_list: Option<PathBuf>,
    /// Keep only articles published in or after this year
    pub min_year: Option<i32>,
    /// Optional destination for the distinct section-label log
    pub log_file: Option<PathBuf>,
    /// Rows per insert batch
    pub batch_size: usize,
}

impl Config {
    pub fn new(database: impl Into<PathBuf>, archive: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            archive: archive.into(),
            doi_list: None,
            min_year: None,
            log_file: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}
