//! Shared helpers for reading files and handling paths

pub mod encoding;
pub mod paths;

pub use encoding::{count_lines, resolve_encoding, LineCount};
pub use paths::{join_segment, path_segments};
