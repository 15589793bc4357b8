//! Encoding-tolerant line counting.
//!
//! This module provides streaming line counting that handles:
//! - Any WHATWG encoding label (UTF-8 by default)
//! - A leading byte order mark, which is kept as content
//! - Malformed byte sequences, which are skipped rather than reported as errors
//! - `\n`, `\r\n` and lone `\r` terminators
//! - A final segment without a trailing terminator

use crate::domain::LocError;
use anyhow::{Context, Result};
use encoding_rs::{DecoderResult, Encoding};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Result of counting the lines of one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCount {
    /// Number of line records.
    pub lines: u64,
    /// Number of malformed byte sequences that were skipped.
    pub malformed: u64,
}

/// Look up an encoding by its WHATWG label (e.g. "utf-8", "latin1", "utf-16le").
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, LocError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| LocError::UnknownEncoding(label.to_string()))
}

/// Count the line records of a file.
///
/// The file is decoded in chunks without replacement characters, so undecodable
/// bytes never contribute content of their own. Open and read failures are errors;
/// decoding failures are not.
///
/// # Arguments
/// * `path` - Path to the file to count
/// * `encoding` - Encoding used to decode the file content
///
/// # Returns
/// The [`LineCount`] of the file. An empty file yields zero lines.
pub fn count_lines(path: &Path, encoding: &'static Encoding) -> Result<LineCount> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    count_lines_from_reader(file, encoding)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Count line records from any byte source.
pub fn count_lines_from_reader<R: Read>(
    mut reader: R,
    encoding: &'static Encoding,
) -> std::io::Result<LineCount> {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut counter = LineCounter::default();
    let mut malformed = 0u64;
    let mut buf = vec![0u8; READ_CHUNK_SIZE];
    let mut text = String::new();

    loop {
        let read = match reader.read(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let last = read == 0;
        let mut src = &buf[..read];

        loop {
            text.clear();
            let needed = decoder
                .max_utf8_buffer_length_without_replacement(src.len())
                .unwrap_or(READ_CHUNK_SIZE * 4);
            text.reserve(needed.max(16));

            let (result, consumed) =
                decoder.decode_to_string_without_replacement(src, &mut text, last);
            counter.feed(&text);
            src = &src[consumed..];

            match result {
                DecoderResult::InputEmpty => break,
                DecoderResult::OutputFull => {}
                DecoderResult::Malformed(_, _) => malformed += 1,
            }
        }

        if last {
            break;
        }
    }

    Ok(LineCount { lines: counter.finish(), malformed })
}

/// Incremental universal-newline line counter over decoded text.
#[derive(Debug, Default)]
struct LineCounter {
    lines: u64,
    after_cr: bool,
    open_segment: bool,
}

impl LineCounter {
    fn feed(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => {
                    // The `\n` of a `\r\n` pair was already counted at the `\r`.
                    if !self.after_cr {
                        self.lines += 1;
                    }
                    self.after_cr = false;
                    self.open_segment = false;
                }
                '\r' => {
                    self.lines += 1;
                    self.after_cr = true;
                    self.open_segment = false;
                }
                _ => {
                    self.after_cr = false;
                    self.open_segment = true;
                }
            }
        }
    }

    fn finish(self) -> u64 {
        self.lines + u64::from(self.open_segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16LE, UTF_8};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn count_bytes(bytes: &[u8]) -> LineCount {
        count_lines_from_reader(bytes, UTF_8).unwrap()
    }

    #[test]
    fn test_empty_file_has_no_lines() {
        let file = NamedTempFile::new().unwrap();
        let count = count_lines(file.path(), UTF_8).unwrap();
        assert_eq!(count.lines, 0);
    }

    #[test]
    fn test_trailing_newline() {
        assert_eq!(count_bytes(b"a\nb\nc\n").lines, 3);
    }

    #[test]
    fn test_unterminated_last_line_is_counted() {
        assert_eq!(count_bytes(b"a\nb").lines, 2);
    }

    #[test]
    fn test_blank_lines_are_counted() {
        assert_eq!(count_bytes(b"\n\n\n").lines, 3);
    }

    #[test]
    fn test_universal_newlines() {
        assert_eq!(count_bytes(b"a\r\nb\rc\n").lines, 3);
        assert_eq!(count_bytes(b"\r\n").lines, 1);
        assert_eq!(count_bytes(b"\r\r").lines, 2);
    }

    #[test]
    fn test_crlf_split_across_chunks() {
        let mut content = vec![b'x'; READ_CHUNK_SIZE - 1];
        content.push(b'\r');
        content.extend_from_slice(b"\nend");
        assert_eq!(count_bytes(&content).lines, 2);
    }

    #[test]
    fn test_bom_only_file_is_one_line() {
        assert_eq!(count_bytes(b"\xef\xbb\xbf").lines, 1);
    }

    #[test]
    fn test_bom_prefixed_file_keeps_line_count() {
        assert_eq!(count_bytes(b"\xef\xbb\xbfa\nb\n").lines, 2);
        assert_eq!(count_bytes(b"\xef\xbb\xbf\n").lines, 1);
    }

    #[test]
    fn test_malformed_bytes_are_skipped() {
        let count = count_bytes(b"ok\n\xff\xfe bad\n\xc3");
        assert_eq!(count.lines, 2);
        assert!(count.malformed >= 2);
    }

    #[test]
    fn test_only_malformed_tail_does_not_open_a_line() {
        assert_eq!(count_bytes(b"a\n\xff").lines, 1);
    }

    #[test]
    fn test_binary_content_is_counted_leniently() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x00, 0x01, 0x0a, 0x89, 0x50, 0x4e, 0x47, 0x0a, 0xff]).unwrap();
        file.flush().unwrap();

        let count = count_lines(file.path(), UTF_8).unwrap();
        assert_eq!(count.lines, 2);
    }

    #[test]
    fn test_utf16_content_with_explicit_encoding() {
        let bytes: Vec<u8> = "one\ntwo\n".encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        let count = count_lines_from_reader(bytes.as_slice(), UTF_16LE).unwrap();
        assert_eq!(count.lines, 2);
        assert_eq!(count.malformed, 0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(count_lines(&dir.path().join("gone.txt"), UTF_8).is_err());
    }

    #[test]
    fn test_resolve_encoding_labels() {
        assert_eq!(resolve_encoding("utf-8").unwrap(), UTF_8);
        assert_eq!(resolve_encoding(" UTF8 ").unwrap(), UTF_8);
        assert!(matches!(resolve_encoding("klingon"), Err(LocError::UnknownEncoding(_))));
    }
}
