//! Line counting pipeline

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use crate::aggregate::emit_tree;
use crate::config::load_config;
use crate::domain::MetricNaming;
use crate::render::AppendLog;
use crate::scan::collect_locs;

#[derive(Args)]
pub struct CountArgs {
    /// Path to the repo to be benchmarked
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Path the output file should be written to
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Path to a TOML or YAML config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: CountArgs) -> Result<()> {
    let started = Instant::now();
    let config = load_config(args.config.as_deref())?;

    let (tree, stats) = collect_locs(&args.target, &config)
        .with_context(|| format!("Failed to count lines in {}", args.target.display()))?;

    // The output is only touched once counting has succeeded.
    let mut log = AppendLog::open(&args.output, true)?;
    emit_tree(&tree, &MetricNaming::default(), config.order, &mut log)?;

    tracing::info!(
        files_listed = stats.files_listed,
        files = stats.files_counted,
        files_with_malformed = stats.files_with_malformed,
        total_lines = stats.total_lines,
        records = log.written(),
        elapsed = ?started.elapsed(),
        "Appended line counts to {}",
        args.output.display()
    );
    Ok(())
}
