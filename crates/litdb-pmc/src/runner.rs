//! Pipeline driver
//!
//! Reader -> detector -> extractor -> filter -> sink, one member at a
//! time, strictly sequential. All mutable run state (statistics, the
//! section-label log, the insert buffer) is owned here.

use std::time::Instant;

use anyhow::{Context, Result};
use litdb_core::{
    ArchiveReader, DoiAllowList, ProgressContext, RunContext, RunStats, SqliteSink,
};

use crate::bioc;
use crate::config::Config;
use crate::crossref::{CrossrefClient, JournalLookup};
use crate::detect::{detect, Format};
use crate::jats;

/// Pipeline execution summary
#[derive(Debug)]
pub struct Summary {
    pub members: usize,
    pub accepted: usize,
    pub inserted: usize,
    pub conflicts: usize,
    pub skipped: usize,
    pub stats: RunStats,
    pub elapsed: std::time::Duration,
}

/// Run with a real Crossref client and auto-detected progress.
pub fn run(config: &Config) -> Result<Summary> {
    run_with(config, &CrossrefClient::new(), &ProgressContext::new())
}

/// Run the full pipeline.
pub fn run_with(
    config: &Config,
    lookup: &dyn JournalLookup,
    progress: &ProgressContext,
) -> Result<Summary> {
    let start = Instant::now();

    let allow_list = config
        .doi_list
        .as_deref()
        .map(DoiAllowList::from_file)
        .transpose()?;

    let mut sink = SqliteSink::open(&config.database)?;
    let mut reader = ArchiveReader::open(&config.archive)?;
    let mut ctx = RunContext::new();

    let pb = progress.member_spinner();
    let mut members = 0usize;
    let mut accepted = 0usize;
    let mut skipped = 0usize;
    let mut inserted = 0usize;
    let mut conflicts = 0usize;

    for member in reader.members()? {
        let member = member?;
        members += 1;
        pb.set_message(member.name.clone());
        pb.inc(1);

        let record = match detect(&member.content) {
            Format::Jats => {
                let xml = std::str::from_utf8(&member.content)
                    .with_context(|| format!("Member {} is not valid UTF-8", member.name))?;
                let record = jats::extract(xml)
                    .with_context(|| format!("Malformed JATS member {}", member.name))?;
                // Same counter/year-gate ordering as the BioC path: PMID
                // is counted before the year filter, DOI after it.
                ctx.stats.record_pmid(record.pmid != 0);
                if config.min_year.is_some_and(|min| record.year < min) {
                    None
                } else {
                    ctx.stats.record_doi(!record.doi.is_empty());
                    Some(record)
                }
            }
            Format::Bioc => bioc::extract(&member.content, config.min_year, &mut ctx)
                .with_context(|| format!("Malformed BioC member {}", member.name))?,
        };

        let Some(mut record) = record else {
            skipped += 1;
            continue;
        };

        if let Some(list) = &allow_list {
            if record.doi.is_empty() || !list.contains(&record.doi) {
                skipped += 1;
                continue;
            }
            ctx.stats.record_doi_match();
            if let Some(journal) = lookup.journal_for(&record.doi) {
                record.journal_name = journal;
            }
        }

        sink.push(record);
        accepted += 1;
        if sink.len() >= config.batch_size {
            let report = sink.flush()?;
            inserted += report.inserted;
            conflicts += report.conflicts;
        }
    }

    // Final flush for any partial batch.
    let report = sink.flush()?;
    inserted += report.inserted;
    conflicts += report.conflicts;
    pb.finish_and_clear();

    if let Some(path) = &config.log_file {
        ctx.sections
            .write_to(path)
            .with_context(|| format!("Failed to write section log {}", path.display()))?;
    }

    ctx.stats.log_summary();

    let summary = Summary {
        members,
        accepted,
        inserted,
        conflicts,
        skipped,
        stats: ctx.stats,
        elapsed: start.elapsed(),
    };
    log::info!(
        "Processed {} members: {} accepted, {} inserted, {} conflicts, {} skipped [{:.1}s]",
        summary.members,
        summary.accepted,
        summary.inserted,
        summary.conflicts,
        summary.skipped,
        summary.elapsed.as_secs_f64()
    );
    Ok(summary)
}
