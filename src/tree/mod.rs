//! Tree model, construction, filtering, and statistics.

mod build;
mod fold;
mod patterns;
mod search;
mod serialize;
mod stats;
pub mod visit;

use std::collections::BTreeMap;

pub use build::{build, Built};
pub use fold::FoldState;
pub use patterns::{MatchMode, PatternSet, DEFAULT_PATTERNS};
pub use search::filter;
pub use serialize::{
    canonical_text, display_rows, export_text, line_prefix, stats_header, visible_rows, DisplayRow,
    RowMarker,
};
pub use stats::{Stats, UNKNOWN_EXTENSION};

/// Whether a node is a file or a directory. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Directory,
}

impl NodeKind {
    pub fn is_dir(self) -> bool {
        self == NodeKind::Directory
    }
}

/// One path segment in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Segment name, unique among its siblings.
    pub name: String,
    pub kind: NodeKind,
    /// Children keyed by name. Always empty for files.
    pub children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: BTreeMap::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(TreeNode::node_count).sum::<usize>()
    }
}

/// The implicit, unnamed root container of a loaded dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    pub entries: BTreeMap<String, TreeNode>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of nodes below the root.
    pub fn node_count(&self) -> usize {
        self.entries.values().map(TreeNode::node_count).sum()
    }

    /// Look up a node by its `/`-joined path from the root.
    pub fn get(&self, path: &str) -> Option<&TreeNode> {
        let mut segments = split_segments(path);
        let mut node = self.entries.get(segments.next()?)?;
        for segment in segments {
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    /// Whether the given path exists and names a directory.
    pub fn is_folder(&self, path: &str) -> bool {
        self.get(path).is_some_and(TreeNode::is_dir)
    }
}

/// A raw input record: a slash-delimited path and the kind of its last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    pub path: String,
    pub kind: NodeKind,
}

impl PathRecord {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::File,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::Directory,
        }
    }
}

/// The raw source every rebuild starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Display name of the root (directory name or repository name).
    pub root_name: String,
    pub records: Vec<PathRecord>,
}

impl Dataset {
    pub fn new(root_name: impl Into<String>, records: Vec<PathRecord>) -> Self {
        Self {
            root_name: root_name.into(),
            records,
        }
    }
}

/// Split a path into its non-empty `/`-separated segments.
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_segments_drops_empty_parts() {
        let parts: Vec<&str> = split_segments("/a//b/c/").collect();
        assert_eq!(parts, vec!["a", "b", "c"]);
        assert_eq!(split_segments("///").count(), 0);
    }

    #[test]
    fn get_walks_nested_children() {
        let mut src = TreeNode::new("src", NodeKind::Directory);
        src.children
            .insert("main.rs".into(), TreeNode::new("main.rs", NodeKind::File));
        let mut tree = Tree::new();
        tree.entries.insert("src".into(), src);

        assert!(tree.is_folder("src"));
        assert_eq!(tree.get("src/main.rs").map(|n| n.kind), Some(NodeKind::File));
        assert!(tree.get("src/lib.rs").is_none());
        assert!(tree.get("").is_none());
        assert_eq!(tree.node_count(), 2);
    }
}
