use std::collections::BTreeSet;

use super::visit::{walk, Visit};
use super::{NodeKind, Tree};

/// Extension recorded for files without one.
pub const UNKNOWN_EXTENSION: &str = "unknown";

/// File, folder and extension counts for one build pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    file_count: usize,
    folder_count: usize,
    extensions: BTreeSet<String>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recount a finished tree from scratch.
    pub fn of(tree: &Tree) -> Self {
        let mut stats = Self::new();
        walk(tree, &mut |v: &Visit<'_>| {
            stats.observe(v.node.kind, &v.node.name);
            true
        });
        stats
    }

    pub fn reset(&mut self) {
        self.file_count = 0;
        self.folder_count = 0;
        self.extensions.clear();
    }

    /// Record a newly created node.
    pub fn observe(&mut self, kind: NodeKind, name: &str) {
        match kind {
            NodeKind::File => {
                self.file_count += 1;
                self.extensions.insert(extension_of(name));
            }
            NodeKind::Directory => self.folder_count += 1,
        }
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn folder_count(&self) -> usize {
        self.folder_count
    }

    pub fn distinct_extension_count(&self) -> usize {
        self.extensions.len()
    }

    /// Distinct lowercase extensions, sorted.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

/// Lowercased text after the last `.`, or [`UNKNOWN_EXTENSION`].
fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
        _ => UNKNOWN_EXTENSION.to_string(),
    }
}
