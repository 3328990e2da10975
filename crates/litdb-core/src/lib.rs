//! Litdb Core - Common infrastructure for the literature loader
//!
//! This crate provides the pieces shared by every ingestion format:
//! archive reading, the canonical article row schema, the SQLite sink,
//! DOI allow-list filtering, run statistics, and logging/progress
//! plumbing.

pub mod archive;
pub mod context;
pub mod filter;
pub mod logging;
pub mod progress;
pub mod record;
pub mod sections;
pub mod sink;
pub mod stats;

// Re-exports for convenience
pub use archive::{ArchiveReader, Member};
pub use context::RunContext;
pub use filter::DoiAllowList;
pub use logging::init_logging;
pub use progress::ProgressContext;
pub use record::ArticleRecord;
pub use sections::SectionLog;
pub use sink::{FlushReport, SqliteSink};
pub use stats::RunStats;
