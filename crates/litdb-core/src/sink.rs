//! SQLite destination table and batched inserts
//!
//! Rows accumulate in memory and are written in one transaction per
//! flush. Constraint violations (re-runs against a table with a
//! uniqueness constraint) are caught per row and reported, never
//! aborting the flush.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::record::ArticleRecord;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS pcw_literature (
    pmid INTEGER, title TEXT, year INTEGER, doi TEXT,
    journal_name TEXT, first_author TEXT, abstract TEXT,
    content TEXT, methods TEXT, results TEXT)";

const INSERT_ROW: &str = "INSERT INTO pcw_literature VALUES (?,?,?,?,?,?,?,?,?,?)";

/// Row counts from one flush.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlushReport {
    pub inserted: usize,
    pub conflicts: usize,
}

/// Buffered writer into the `pcw_literature` table.
pub struct SqliteSink {
    conn: Connection,
    buffer: Vec<ArticleRecord>,
}

impl std::fmt::Debug for SqliteSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSink")
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

impl SqliteSink {
    /// Open (creating if needed) the database and destination table.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        conn.execute(CREATE_TABLE, [])
            .context("Failed to create pcw_literature table")?;
        Ok(Self {
            conn,
            buffer: Vec::new(),
        })
    }

    pub fn push(&mut self, record: ArticleRecord) {
        self.buffer.push(record);
    }

    /// Number of buffered, unflushed rows.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Write all buffered rows in one transaction.
    ///
    /// Constraint violations are logged and counted, other insert errors
    /// propagate (and roll the transaction back).
    pub fn flush(&mut self) -> Result<FlushReport> {
        if self.buffer.is_empty() {
            return Ok(FlushReport::default());
        }
        let tx = self
            .conn
            .transaction()
            .context("Failed to begin transaction")?;
        let mut report = FlushReport::default();
        {
            let mut stmt = tx
                .prepare_cached(INSERT_ROW)
                .context("Failed to prepare insert")?;
            for rec in self.buffer.drain(..) {
                let result = stmt.execute(params![
                    rec.pmid,
                    rec.title,
                    rec.year,
                    rec.doi,
                    rec.journal_name,
                    rec.first_author,
                    rec.abstract_text,
                    rec.content,
                    rec.methods,
                    rec.results,
                ]);
                match result {
                    Ok(_) => report.inserted += 1,
                    Err(rusqlite::Error::SqliteFailure(e, msg))
                        if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                    {
                        log::warn!(
                            "Insert conflict for pmid {}: {}",
                            rec.pmid,
                            msg.as_deref().unwrap_or("constraint violation")
                        );
                        report.conflicts += 1;
                    }
                    Err(e) => {
                        return Err(e).context(format!("Insert failed for pmid {}", rec.pmid))
                    }
                }
            }
        }
        tx.commit().context("Failed to commit batch")?;
        log::debug!(
            "Flushed batch: {} inserted, {} conflicts",
            report.inserted,
            report.conflicts
        );
        Ok(report)
    }
}
