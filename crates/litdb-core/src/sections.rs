//! Distinct section-label accumulation
//!
//! Tracks every body section type seen across a run, in first-seen
//! order, for the optional end-of-run label log.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use rustc_hash::FxHashSet;

/// Append-only set of section labels, preserving first-seen order.
#[derive(Debug, Default)]
pub struct SectionLog {
    seen: FxHashSet<String>,
    order: Vec<String>,
}

impl SectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: &str) {
        if self.seen.insert(label.to_string()) {
            self.order.push(label.to_string());
        }
    }

    /// Labels in first-seen order.
    pub fn labels(&self) -> &[String] {
        &self.order
    }

    /// Append labels to `path`, one per line.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        for label in &self.order {
            writeln!(writer, "{label}")?;
        }
        writer.flush()?;
        log::info!("Wrote {} section labels to {}", self.order.len(), path.display());
        Ok(())
    }
}
