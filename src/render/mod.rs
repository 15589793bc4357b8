//! Metric record rendering and output sinks

pub mod jsonl;
pub mod sink;

pub use jsonl::render_record;
pub use sink::{AppendLog, RecordSink};
