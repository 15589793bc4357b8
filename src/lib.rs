//! repo-loc: hierarchical line-of-code metrics for git repositories
//!
//! Lists the files tracked by git, counts their lines, aggregates the counts per
//! directory and appends one `{"metric": ..., "value": ...}` record per node to a
//! JSONL file.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod domain;
pub mod render;
pub mod scan;
pub mod utils;

pub use aggregate::emit_tree;
pub use domain::{Config, LocError, LocNode, MetricRecord};
pub use scan::collect_locs;
