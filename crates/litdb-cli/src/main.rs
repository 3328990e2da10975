//! litdb - Load PMC full-text dumps into a SQLite literature table
//!
//! Accepts gzip-compressed tar archives whose members are JATS XML or
//! BioC JSON article documents, normalizes them to one fixed row
//! schema, and batch-inserts into `pcw_literature`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use litdb_pmc::Config;

#[derive(Parser)]
#[command(name = "litdb")]
#[command(about = "Stores PMC articles in a SQLite database")]
#[command(version)]
struct Cli {
    /// Destination SQLite database
    #[arg(long, value_name = "literature.db")]
    database: PathBuf,

    /// BioC PMC articles in JSON or XML format (gz)
    #[arg(long = "pmc-gz", value_name = "PMC000XXXXX_article_data.tar.gz")]
    pmc_gz: PathBuf,

    /// DOI allow-list for selected journals (one DOI per line)
    #[arg(long = "doi-to-keep", value_name = "doi.txt")]
    doi_to_keep: Option<PathBuf>,

    /// Consider only articles published this year or after
    #[arg(long, value_name = "2005")]
    min_year: Option<i32>,

    /// Section-label log file
    #[arg(long, value_name = "log.txt")]
    log_file: Option<PathBuf>,

    /// Number of inserts per batch
    #[arg(long, default_value_t = litdb_pmc::config::DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Only warnings and errors
    #[arg(long, conflicts_with = "debug")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = litdb_core::ProgressContext::new();
    let multi = progress.is_tty().then(|| progress.multi());
    litdb_core::init_logging(cli.quiet, cli.debug, multi);

    let config = Config {
        database: cli.database,
        archive: cli.pmc_gz,
        doi_list: cli.doi_to_keep,
        min_year: cli.min_year,
        log_file: cli.log_file,
        batch_size: cli.batch_size,
    };

    let summary = litdb_pmc::run_with(&config, &litdb_pmc::CrossrefClient::new(), &progress)?;

    eprintln!("\n{}", summary.stats.format_table());
    eprintln!(
        "{} members processed: {} accepted, {} inserted, {} conflicts, {} skipped in {:.1}s",
        summary.members,
        summary.accepted,
        summary.inserted,
        summary.conflicts,
        summary.skipped,
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}
