//! Core domain types shared across the crate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Default metric namespace prepended to every record name.
pub const DEFAULT_METRIC_NAMESPACE: &str = "files";

/// Default metric suffix appended after the `//` separator.
pub const DEFAULT_METRIC_SUFFIX: &str = "loc";

/// Typed failures raised by the scanning and counting pipeline.
#[derive(Debug, Error)]
pub enum LocError {
    /// The `git` executable could not be spawned.
    #[error("failed to run git in {path}: {source}")]
    GitUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `git ls-files` exited unsuccessfully.
    #[error("git ls-files failed in {path} ({status}): {stderr}")]
    ListingFailed { path: PathBuf, status: String, stderr: String },

    /// The target is not inside a git work tree.
    #[error("not a git repository: {path}: {message}")]
    NotARepository { path: PathBuf, message: String },

    /// The repository index could not be read.
    #[error("failed to read git index for {path}: {message}")]
    IndexUnreadable { path: PathBuf, message: String },

    /// A tracked path could not be decoded as UTF-8.
    #[error("tracked path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    /// The same segment is both a file and a directory.
    #[error("path conflict at '{0}': entry is both a file and a directory")]
    PathConflict(String),

    /// The configured text encoding label is not recognized.
    #[error("unknown text encoding '{0}'")]
    UnknownEncoding(String),
}

/// Counters collected while listing and counting files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_listed: usize,
    pub files_counted: usize,
    pub total_lines: u64,
    /// Files in which at least one malformed byte sequence was skipped.
    pub files_with_malformed: usize,
}

/// One node of the line-count tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocNode {
    /// Line count of a single tracked file.
    Leaf(u64),
    /// A directory with its children in first-insertion order.
    Directory(LocDir),
}

impl LocNode {
    pub fn empty_dir() -> Self {
        LocNode::Directory(LocDir::default())
    }

    /// Sum of all leaves at or below this node.
    pub fn total(&self) -> u64 {
        match self {
            LocNode::Leaf(count) => *count,
            LocNode::Directory(dir) => dir.iter().map(|(_, child)| child.total()).sum(),
        }
    }
}

/// Insertion-ordered mapping from path segment to child node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocDir {
    entries: Vec<(String, LocNode)>,
    index: HashMap<String, usize>,
}

impl LocDir {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&LocNode> {
        self.index.get(name).map(|&idx| &self.entries[idx].1)
    }

    /// Returns the child named `name`, inserting the node built by `make` if absent.
    pub fn entry_or_insert_with(
        &mut self,
        name: &str,
        make: impl FnOnce() -> LocNode,
    ) -> &mut LocNode {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.entries.push((name.to_string(), make()));
                let idx = self.entries.len() - 1;
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    /// Iterate children in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }
}

/// How the metric names are assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricNaming {
    pub namespace: String,
    pub suffix: String,
}

impl Default for MetricNaming {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_METRIC_NAMESPACE.to_string(),
            suffix: DEFAULT_METRIC_SUFFIX.to_string(),
        }
    }
}

impl MetricNaming {
    /// Metric name for a node; an empty path names the grand total.
    pub fn metric_for(&self, path: &str) -> String {
        if path.is_empty() {
            format!("{}//{}", self.namespace, self.suffix)
        } else {
            format!("{}/{}//{}", self.namespace, path, self.suffix)
        }
    }
}

/// A single append-only output unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub metric: String,
    pub value: u64,
}

impl MetricRecord {
    pub fn total(naming: &MetricNaming, value: u64) -> Self {
        Self { metric: naming.metric_for(""), value }
    }

    pub fn node(naming: &MetricNaming, path: &str, value: u64) -> Self {
        Self { metric: naming.metric_for(path), value }
    }
}

/// Source of the tracked file list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingBackend {
    /// Spawn `git ls-files -z` in the target directory.
    #[default]
    GitCli,
    /// Read the repository index through libgit2.
    GitIndex,
}

/// Order in which sibling nodes are visited when emitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryOrder {
    /// Order in which paths were first seen in the listing.
    #[default]
    Listing,
    /// Byte-wise sorted segment names.
    Sorted,
}

/// Run configuration. Every field has a default so an absent config file is valid.
///
/// Nothing here changes the metric names or the stdout echo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub listing: ListingBackend,
    pub encoding: String,
    pub order: EntryOrder,
    /// Show a progress bar on stderr while counting.
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing: ListingBackend::default(),
            encoding: "utf-8".to_string(),
            order: EntryOrder::default(),
            progress: true,
        }
    }
}
