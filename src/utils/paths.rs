//! Relative path handling

/// Split a relative path into its meaningful segments.
///
/// Empty segments (from doubled or trailing slashes) and `.` are dropped.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty() && *segment != ".").collect()
}

/// Join a parent metric path and a child segment with `/`.
pub fn join_segment(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{}/{}", parent, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments_skip_noise() {
        assert_eq!(path_segments("a/b.txt"), vec!["a", "b.txt"]);
        assert_eq!(path_segments("./a//b/"), vec!["a", "b"]);
        assert!(path_segments("").is_empty());
    }

    #[test]
    fn test_join_segment() {
        assert_eq!(join_segment("", "a"), "a");
        assert_eq!(join_segment("a/b", "c.rs"), "a/b/c.rs");
    }

    #[test]
    fn test_backslash_does_not_split() {
        assert_eq!(path_segments(r"a\b.txt"), vec![r"a\b.txt"]);
        assert_eq!(path_segments(r"x/a\b"), vec!["x", r"a\b"]);
    }
}
