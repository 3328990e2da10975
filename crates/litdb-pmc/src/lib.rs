//! Litdb PMC - PubMed Central dump ingestion
//!
//! Loads PMC full-text dump archives into a SQLite literature table.
//! Archive members come in two shapes encoding the same article
//! concepts: JATS XML trees and BioC JSON passage lists. Both are
//! normalized into one fixed 10-field row.
//!
//! # Example
//!
//! ```ignore
//! use litdb_pmc::{run, Config};
//!
//! let config = Config::new("literature.db", "PMC000XXXXX.tar.gz");
//! let summary = run(&config)?;
//! println!("Inserted {} articles", summary.inserted);
//! ```

pub mod author;
pub mod bioc;
pub mod config;
pub mod crossref;
pub mod detect;
pub mod jats;
pub mod runner;

// Re-exports
pub use config::Config;
pub use crossref::{CrossrefClient, JournalLookup};
pub use detect::{detect, Format};
pub use runner::{run, run_with, Summary};
