//! Tracked file listing, line counting and tree building

use crate::domain::{Config, ListingBackend, LocError, LocNode, ScanStats};
use crate::utils::{count_lines, resolve_encoding};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

pub mod git_cli;
pub mod git_index;
pub mod tree;

pub use tree::{build_tree, LocTreeBuilder};

/// List tracked files under `root`, relative to `root`, in listing order.
pub fn list_tracked_files(root: &Path, backend: ListingBackend) -> Result<Vec<String>, LocError> {
    match backend {
        ListingBackend::GitCli => git_cli::ls_files(root),
        ListingBackend::GitIndex => git_index::index_files(root),
    }
}

/// Count every tracked file under `root` and fold the counts into a tree.
///
/// Files are counted one at a time in listing order. Any listing, open or read
/// failure aborts the whole scan.
pub fn collect_locs(root: &Path, config: &Config) -> Result<(LocNode, ScanStats)> {
    let encoding = resolve_encoding(&config.encoding)?;
    let files = list_tracked_files(root, config.listing)
        .with_context(|| format!("Failed to list tracked files in {}", root.display()))?;
    tracing::debug!("Listed {} tracked files in {}", files.len(), root.display());

    let mut stats = ScanStats { files_listed: files.len(), ..ScanStats::default() };
    let bar = progress_bar(config.progress, files.len() as u64);
    let mut builder = LocTreeBuilder::new();

    for rel_path in &files {
        bar.set_message(rel_path.clone());
        let count = count_lines(&root.join(rel_path), encoding)?;
        tracing::debug!("{}: {} lines", rel_path, count.lines);
        if count.malformed > 0 {
            tracing::debug!("{}: skipped {} malformed sequences", rel_path, count.malformed);
            stats.files_with_malformed += 1;
        }

        builder.insert(rel_path, count.lines)?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    stats.files_counted = builder.file_count();
    let tree = builder.build();
    stats.total_lines = tree.total();
    Ok((tree, stats))
}

fn progress_bar(enabled: bool, len: u64) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    let style =
        ProgressStyle::with_template("{spinner} Counting lines [{bar:30}] {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}
