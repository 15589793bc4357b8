//! JSONL rendering of metric records

use crate::domain::MetricRecord;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

/// Render one record as a single JSON object line (without the trailing newline).
///
/// Separators are `", "` and `": "`, and every non-ASCII character is written as a
/// `\uXXXX` escape, e.g. `{"metric": "files//loc", "value": 10}`.
pub fn render_record(record: &MetricRecord) -> serde_json::Result<String> {
    let mut buf = Vec::with_capacity(64);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedAsciiFormatter);
    record.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Compact JSON with spaced separators and ASCII-only strings.
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(metric: &str, value: u64) -> MetricRecord {
        MetricRecord { metric: metric.to_string(), value }
    }

    #[test]
    fn test_render_total_record() {
        let line = render_record(&record("files//loc", 10)).unwrap();
        assert_eq!(line, r#"{"metric": "files//loc", "value": 10}"#);
    }

    #[test]
    fn test_render_keeps_field_order() {
        let line = render_record(&record("files/a/x.txt//loc", 3)).unwrap();
        assert!(line.starts_with(r#"{"metric": "#));
        assert!(line.ends_with(r#""value": 3}"#));
    }

    #[test]
    fn test_render_escapes_non_ascii() {
        let line = render_record(&record("files/caf\u{e9}/\u{1f600}.md//loc", 1)).unwrap();
        assert_eq!(line, r#"{"metric": "files/caf\u00e9/\ud83d\ude00.md//loc", "value": 1}"#);
    }

    #[test]
    fn test_render_escapes_quotes_and_controls() {
        let line = render_record(&record("files/a\"b\tc//loc", 0)).unwrap();
        assert_eq!(line, r#"{"metric": "files/a\"b\tc//loc", "value": 0}"#);
    }

    #[test]
    fn test_rendered_line_parses_back() {
        let original = record("files/\u{5b57}.rs//loc", 42);
        let line = render_record(&original).unwrap();
        let parsed: MetricRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, original);
    }
}
