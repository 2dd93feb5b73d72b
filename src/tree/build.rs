use std::collections::btree_map::Entry;

use super::{split_segments, NodeKind, PathRecord, PatternSet, Stats, Tree, TreeNode};

/// Output of one build pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Built {
    pub tree: Tree,
    pub stats: Stats,
}

/// Build a tree from raw records, dropping every record that has an excluded
/// segment anywhere in its path.
///
/// Intermediate segments become directories and the last one takes the
/// record's kind. The first kind seen for a position wins; a record that
/// would descend through an existing file stops at that file.
pub fn build(records: &[PathRecord], patterns: &PatternSet) -> Built {
    let mut tree = Tree::new();
    let mut stats = Stats::new();
    let mut excluded = 0usize;
    let mut malformed = 0usize;

    for record in records {
        let segments: Vec<&str> = split_segments(&record.path).collect();
        if segments.is_empty() {
            tracing::trace!(path = %record.path, "skipping record without segments");
            malformed += 1;
            continue;
        }
        if patterns.excludes_any(segments.iter().copied()) {
            excluded += 1;
            continue;
        }
        insert(&mut tree, &segments, record.kind, &mut stats);
    }

    tracing::debug!(
        records = records.len(),
        excluded,
        malformed,
        files = stats.file_count(),
        folders = stats.folder_count(),
        "built tree"
    );
    Built { tree, stats }
}

fn insert(tree: &mut Tree, segments: &[&str], kind: NodeKind, stats: &mut Stats) {
    let last = segments.len() - 1;
    let mut level = &mut tree.entries;
    for (i, segment) in segments.iter().enumerate() {
        let node_kind = if i == last { kind } else { NodeKind::Directory };
        let node = match level.entry(segment.to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                stats.observe(node_kind, segment);
                e.insert(TreeNode::new(*segment, node_kind))
            }
        };
        if i < last && !node.is_dir() {
            tracing::trace!(
                segment = %segment,
                "path descends through a file; keeping the file"
            );
            return;
        }
        level = &mut node.children;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intermediate_segments_are_directories() {
        let built = build(&[PathRecord::file("a/b/c.txt")], &PatternSet::empty());
        assert!(built.tree.is_folder("a"));
        assert!(built.tree.is_folder("a/b"));
        assert_eq!(
            built.tree.get("a/b/c.txt").map(|n| n.kind),
            Some(NodeKind::File)
        );
        assert_eq!(built.stats.folder_count(), 2);
        assert_eq!(built.stats.file_count(), 1);
    }

    #[test]
    fn first_seen_kind_wins() {
        let records = vec![PathRecord::file("x"), PathRecord::file("x/y.txt")];
        let built = build(&records, &PatternSet::empty());
        let x = built.tree.get("x").unwrap();
        assert_eq!(x.kind, NodeKind::File);
        assert!(x.children.is_empty());
        assert_eq!(built.stats.file_count(), 1);
        assert_eq!(built.stats.folder_count(), 0);
    }

    #[test]
    fn directory_record_then_file_keeps_directory() {
        let records = vec![PathRecord::dir("lib"), PathRecord::file("lib")];
        let built = build(&records, &PatternSet::empty());
        assert!(built.tree.is_folder("lib"));
        assert_eq!(built.stats.file_count(), 0);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let records = vec![PathRecord::file(""), PathRecord::file("//"), PathRecord::file("ok")];
        let built = build(&records, &PatternSet::empty());
        assert_eq!(built.tree.node_count(), 1);
    }
}
