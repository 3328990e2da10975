//! Run statistics collection and reporting
//!
//! Five counters track data completeness across one run: PMID and DOI
//! presence/absence, plus allow-list matches. Progress lines are logged
//! every 1000 identifier-present and every 1000 identifier-missing
//! records; the final summary is rendered as a table.

use std::time::Instant;

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};

/// How often progress lines are emitted, in records.
const PROGRESS_EVERY: u64 = 1000;

/// Counters for one ingestion run.
#[derive(Debug)]
pub struct RunStats {
    started: Instant,
    pub normal_pmid: u64,
    pub missing_pmid: u64,
    pub normal_doi: u64,
    pub missing_doi: u64,
    pub filtered_doi: u64,
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            normal_pmid: 0,
            missing_pmid: 0,
            normal_doi: 0,
            missing_doi: 0,
            filtered_doi: 0,
        }
    }

    /// Count PMID presence, logging progress every [`PROGRESS_EVERY`] records.
    pub fn record_pmid(&mut self, present: bool) {
        let elapsed = self.started.elapsed().as_secs_f64();
        if present {
            self.normal_pmid += 1;
            if self.normal_pmid % PROGRESS_EVERY == 0 {
                log::info!("{elapsed:.1}s: {} records with PMID", self.normal_pmid);
            }
        } else {
            self.missing_pmid += 1;
            if self.missing_pmid % PROGRESS_EVERY == 0 {
                log::info!("{elapsed:.1}s: {} records missing PMID", self.missing_pmid);
            }
        }
    }

    /// Count DOI presence.
    pub fn record_doi(&mut self, present: bool) {
        if present {
            self.normal_doi += 1;
        } else {
            self.missing_doi += 1;
        }
    }

    /// Count a record whose DOI matched the allow-list.
    pub fn record_doi_match(&mut self) {
        self.filtered_doi += 1;
    }

    /// Log the five-counter summary (non-TTY friendly).
    pub fn log_summary(&self) {
        log::info!("Records with PMID:    {}", fmt_num(self.normal_pmid));
        log::info!("Records missing PMID: {}", fmt_num(self.missing_pmid));
        log::info!("Records with DOI:     {}", fmt_num(self.normal_doi));
        log::info!("Records missing DOI:  {}", fmt_num(self.missing_doi));
        log::info!("Allow-list matches:   {}", fmt_num(self.filtered_doi));
    }

    /// Format the final summary table as a string.
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Run Summary")
                    .fg(Color::Cyan)
                    .add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Count").fg(Color::Cyan),
            ]);
        table.add_row(vec!["Records with PMID".to_string(), fmt_num(self.normal_pmid)]);
        table.add_row(vec!["Records missing PMID".to_string(), fmt_num(self.missing_pmid)]);
        table.add_row(vec!["Records with DOI".to_string(), fmt_num(self.normal_doi)]);
        table.add_row(vec!["Records missing DOI".to_string(), fmt_num(self.missing_doi)]);
        table.add_row(vec!["Allow-list matches".to_string(), fmt_num(self.filtered_doi)]);
        table.add_row(vec![
            "Elapsed".to_string(),
            format!("{:.1}s", self.started.elapsed().as_secs_f64()),
        ]);
        table.to_string()
    }
}

/// Format a number with thousands separators (1234567 -> "1,234,567").
fn fmt_num(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
