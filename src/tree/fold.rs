use std::collections::HashSet;

use super::visit::{walk, Visit};
use super::Tree;

/// Expand/collapse state, keyed by a folder's path from the root.
///
/// Folders are expanded unless listed here. Because the key is the path and
/// not the node, a toggle made on a search result applies to the same folder
/// in the full tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldState {
    collapsed: HashSet<String>,
}

impl FoldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        !self.collapsed.contains(path)
    }

    /// Flip a folder's state. Returns the new expanded flag.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.collapsed.remove(path) {
            true
        } else {
            self.collapsed.insert(path.to_string());
            false
        }
    }

    pub fn set_expanded(&mut self, path: &str, expanded: bool) {
        if expanded {
            self.collapsed.remove(path);
        } else {
            self.collapsed.insert(path.to_string());
        }
    }

    /// Expand or collapse every folder of `tree`.
    pub fn set_all(&mut self, tree: &Tree, expanded: bool) {
        walk(tree, &mut |v: &Visit<'_>| {
            if v.node.is_dir() {
                self.set_expanded(v.path, expanded);
            }
            true
        });
    }

    pub fn clear(&mut self) {
        self.collapsed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{build, PathRecord, PatternSet};

    #[test]
    fn toggle_flips_state() {
        let mut folds = FoldState::new();
        assert!(folds.is_expanded("src"));
        assert!(!folds.toggle("src"));
        assert!(!folds.is_expanded("src"));
        assert!(folds.toggle("src"));
        assert!(folds.is_expanded("src"));
    }

    #[test]
    fn set_all_covers_nested_folders_only() {
        let records = [PathRecord::file("a/b/c.txt"), PathRecord::file("d.txt")];
        let tree = build(&records, &PatternSet::empty()).tree;
        let mut folds = FoldState::new();

        folds.set_all(&tree, false);
        assert!(!folds.is_expanded("a"));
        assert!(!folds.is_expanded("a/b"));
        assert_eq!(folds.collapsed.len(), 2, "files are never recorded");

        folds.set_expanded("a/b", true);
        assert!(folds.is_expanded("a/b"));
        assert!(!folds.is_expanded("a"));

        folds.set_all(&tree, true);
        assert!(folds.collapsed.is_empty());
    }
}
