//! Destinations for emitted metric records.

use super::jsonl::render_record;
use crate::domain::MetricRecord;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Receives records in emission order.
pub trait RecordSink {
    fn emit(&mut self, record: &MetricRecord) -> Result<()>;
}

impl RecordSink for Vec<MetricRecord> {
    fn emit(&mut self, record: &MetricRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Append-only JSONL log file.
///
/// The file is opened once in create+append mode; existing content is never
/// truncated. Each record is written as one line and flushed before the next,
/// so records emitted before a failure stay on disk.
pub struct AppendLog {
    path: PathBuf,
    file: File,
    echo: bool,
    written: usize,
}

impl AppendLog {
    /// Open `path` for appending, creating it if needed.
    ///
    /// With `echo` set, every record is also printed to stdout as
    /// `<metric> -> <value>` just before it is appended.
    pub fn open(path: &Path, echo: bool) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open output file: {}", path.display()))?;
        Ok(Self { path: path.to_path_buf(), file, echo, written: 0 })
    }

    /// Number of records appended through this handle.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl RecordSink for AppendLog {
    fn emit(&mut self, record: &MetricRecord) -> Result<()> {
        if self.echo {
            println!("{} -> {}", record.metric, record.value);
        }

        let mut line = render_record(record)?;
        line.push('\n');
        self.file
            .write_all(line.as_bytes())
            .and_then(|()| self.file.flush())
            .with_context(|| format!("Failed to append to {}", self.path.display()))?;
        self.written += 1;
        Ok(())
    }
}
