//! Line-count tree construction.

use crate::domain::{LocDir, LocError, LocNode};
use crate::utils::{join_segment, path_segments};

/// Folds `(relative path, line count)` pairs into a nested [`LocNode`] tree.
#[derive(Debug, Default)]
pub struct LocTreeBuilder {
    root: LocDir,
    files: usize,
}

impl LocTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct files inserted so far.
    pub fn file_count(&self) -> usize {
        self.files
    }

    /// Insert one file, creating directory nodes for every parent segment.
    ///
    /// Only `/` separates segments; a backslash is part of a name.
    /// Inserting an existing file again replaces its count in place.
    pub fn insert(&mut self, rel_path: &str, count: u64) -> Result<(), LocError> {
        let segments = path_segments(rel_path);
        let Some((file_name, parents)) = segments.split_last() else {
            return Ok(());
        };

        let mut dir = &mut self.root;
        let mut walked = String::new();
        for segment in parents {
            walked = join_segment(&walked, segment);
            dir = match dir.entry_or_insert_with(segment, LocNode::empty_dir) {
                LocNode::Directory(child) => child,
                LocNode::Leaf(_) => return Err(LocError::PathConflict(walked)),
            };
        }

        let existed = dir.get(file_name).is_some();
        match dir.entry_or_insert_with(file_name, || LocNode::Leaf(count)) {
            LocNode::Leaf(existing) => {
                if *existing != count {
                    tracing::debug!(
                        "Replacing count for {}: {} -> {}",
                        rel_path,
                        existing,
                        count
                    );
                }
                *existing = count;
            }
            LocNode::Directory(_) => {
                return Err(LocError::PathConflict(join_segment(&walked, file_name)));
            }
        }

        if !existed {
            self.files += 1;
        }
        Ok(())
    }

    /// Finish building and return the root directory node.
    pub fn build(self) -> LocNode {
        LocNode::Directory(self.root)
    }
}

/// Build a tree from an iterator of `(relative path, line count)` pairs.
pub fn build_tree<'a, I>(pairs: I) -> Result<LocNode, LocError>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut builder = LocTreeBuilder::new();
    for (path, count) in pairs {
        builder.insert(path, count)?;
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(node: &LocNode) -> &LocDir {
        match node {
            LocNode::Directory(dir) => dir,
            LocNode::Leaf(_) => panic!("expected directory"),
        }
    }

    #[test]
    fn test_build_tree_nests_directories() {
        let tree = build_tree([("a/x.txt", 3), ("a/y.txt", 5), ("b.txt", 2)]).expect("tree");

        let root = dir(&tree);
        assert_eq!(root.len(), 2);
        assert_eq!(root.get("b.txt"), Some(&LocNode::Leaf(2)));

        let a = dir(root.get("a").expect("a"));
        assert_eq!(a.get("x.txt"), Some(&LocNode::Leaf(3)));
        assert_eq!(a.get("y.txt"), Some(&LocNode::Leaf(5)));
        assert_eq!(tree.total(), 10);
    }

    #[test]
    fn test_empty_listing_builds_empty_root() {
        let tree = build_tree(std::iter::empty::<(&str, u64)>()).expect("tree");
        assert!(dir(&tree).is_empty());
        assert_eq!(tree.total(), 0);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let tree = build_tree([("z.txt", 1), ("m/a.txt", 1), ("a.txt", 1), ("m/0.txt", 1)])
            .expect("tree");
        let names: Vec<&str> = dir(&tree).iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["z.txt", "m", "a.txt"]);
    }

    #[test]
    fn test_insertion_order_does_not_change_totals() {
        let forward = build_tree([("a/x", 3), ("a/b/y", 4), ("c", 1)]).expect("tree");
        let backward = build_tree([("c", 1), ("a/b/y", 4), ("a/x", 3)]).expect("tree");
        assert_eq!(forward.total(), backward.total());
        assert_eq!(
            dir(&forward).get("a").map(LocNode::total),
            dir(&backward).get("a").map(LocNode::total)
        );
    }

    #[test]
    fn test_duplicate_path_replaces_in_place() {
        let mut builder = LocTreeBuilder::new();
        builder.insert("a.txt", 1).unwrap();
        builder.insert("b.txt", 2).unwrap();
        builder.insert("a.txt", 1).unwrap();
        assert_eq!(builder.file_count(), 2);

        let tree = builder.build();
        let names: Vec<&str> = dir(&tree).iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_backslash_is_part_of_the_file_name() {
        let tree = build_tree([("a", 1), ("a\\b.txt", 2), ("d/c\\e", 3)]).expect("tree");

        let root = dir(&tree);
        let names: Vec<&str> = root.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "a\\b.txt", "d"]);
        assert_eq!(root.get("a"), Some(&LocNode::Leaf(1)));
        assert_eq!(root.get("a\\b.txt"), Some(&LocNode::Leaf(2)));
        assert_eq!(dir(root.get("d").expect("d")).get("c\\e"), Some(&LocNode::Leaf(3)));
    }

    #[test]
    fn test_file_then_directory_conflict() {
        let err = build_tree([("a", 1), ("a/b", 2)]).unwrap_err();
        assert!(matches!(err, LocError::PathConflict(ref p) if p == "a"));
    }

    #[test]
    fn test_directory_then_file_conflict() {
        let err = build_tree([("a/b/c", 1), ("a/b", 2)]).unwrap_err();
        assert!(matches!(err, LocError::PathConflict(ref p) if p == "a/b"));
    }
}
