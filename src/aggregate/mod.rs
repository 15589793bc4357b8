//! Bottom-up aggregation of line counts into metric records.
//!
//! The tree is walked depth-first in post-order: every child is emitted before
//! its parent, and the root's grand total is always the last record.

use crate::domain::{EntryOrder, LocNode, MetricNaming, MetricRecord};
use crate::render::RecordSink;
use crate::utils::join_segment;
use anyhow::Result;

/// Emit one record per node of `root` and return the grand total.
///
/// `root` is treated as the top of the tree: its record uses the total metric
/// name even when it is a single leaf.
pub fn emit_tree<S: RecordSink + ?Sized>(
    root: &LocNode,
    naming: &MetricNaming,
    order: EntryOrder,
    sink: &mut S,
) -> Result<u64> {
    emit_node(root, "", naming, order, sink)
}

fn emit_node<S: RecordSink + ?Sized>(
    node: &LocNode,
    path: &str,
    naming: &MetricNaming,
    order: EntryOrder,
    sink: &mut S,
) -> Result<u64> {
    let total = match node {
        LocNode::Leaf(count) => *count,
        LocNode::Directory(dir) => {
            let mut children: Vec<(&str, &LocNode)> = dir.iter().collect();
            if order == EntryOrder::Sorted {
                children.sort_by(|a, b| a.0.cmp(b.0));
            }

            let mut total = 0u64;
            for (name, child) in children {
                total += emit_node(child, &join_segment(path, name), naming, order, sink)?;
            }
            total
        }
    };

    let record = if path.is_empty() {
        MetricRecord::total(naming, total)
    } else {
        MetricRecord::node(naming, path, total)
    };
    sink.emit(&record)?;
    Ok(total)
}
