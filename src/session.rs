//! The explicit context every tree operation runs against.

use crate::tree::{
    build, display_rows, export_text, filter, Built, Dataset, DisplayRow, FoldState, MatchMode,
    PatternSet, Stats, Tree,
};

/// Owns the pattern set, the raw dataset, the tree built from it, its stats,
/// and the fold state.
///
/// The tree and stats are only ever replaced wholesale, by rebuilding from
/// the raw dataset. Search results are derived values and never stored.
#[derive(Debug, Clone, Default)]
pub struct Session {
    patterns: PatternSet,
    dataset: Option<Dataset>,
    built: Built,
    folds: FoldState,
}

impl Session {
    pub fn new(patterns: PatternSet) -> Self {
        Self {
            patterns,
            dataset: None,
            built: Built::default(),
            folds: FoldState::new(),
        }
    }

    /// Replace the dataset and rebuild.
    pub fn load(&mut self, dataset: Dataset) {
        tracing::info!(
            root = %dataset.root_name,
            records = dataset.records.len(),
            "loading dataset"
        );
        self.dataset = Some(dataset);
        self.rebuild();
    }

    /// Add comma-separated patterns; rebuilds when any was new.
    pub fn add_patterns(&mut self, input: &str) -> usize {
        let added = self.patterns.add(input);
        if added > 0 {
            tracing::info!(added, total = self.patterns.len(), "added exclusion patterns");
            self.rebuild();
        }
        added
    }

    /// Remove a pattern; rebuilds when it was present.
    pub fn remove_pattern(&mut self, pattern: &str) -> bool {
        let removed = self.patterns.remove(pattern);
        if removed {
            tracing::info!(%pattern, "removed exclusion pattern");
            self.rebuild();
        }
        removed
    }

    pub fn set_match_mode(&mut self, mode: MatchMode) {
        if self.patterns.mode() != mode {
            self.patterns.set_mode(mode);
            self.rebuild();
        }
    }

    /// Rebuild from the raw dataset, never from a derived tree.
    fn rebuild(&mut self) {
        self.built = match &self.dataset {
            Some(dataset) => build(&dataset.records, &self.patterns),
            None => Built::default(),
        };
        self.folds.clear();
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn root_name(&self) -> &str {
        self.dataset.as_ref().map_or("", |d| d.root_name.as_str())
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn tree(&self) -> &Tree {
        &self.built.tree
    }

    pub fn stats(&self) -> &Stats {
        &self.built.stats
    }

    /// Derive a search view of the current tree.
    pub fn search(&self, query: &str) -> Tree {
        filter(&self.built.tree, query)
    }

    /// Flip a folder by path. Returns the new expanded flag, or `None` when
    /// the path is not a folder of the current tree.
    pub fn toggle_folder(&mut self, path: &str) -> Option<bool> {
        if !self.built.tree.is_folder(path) {
            return None;
        }
        Some(self.folds.toggle(path))
    }

    pub fn set_all_expanded(&mut self, expanded: bool) {
        self.folds.set_all(&self.built.tree, expanded);
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.folds.is_expanded(path)
    }

    /// Display rows for `view` (the tree itself or a search of it).
    pub fn display_rows(&self, view: &Tree) -> Vec<DisplayRow> {
        display_rows(view, &self.folds)
    }

    /// Export the full tree.
    pub fn export(&self, with_stats: bool) -> String {
        self.export_view(&self.built.tree, with_stats)
    }

    /// Export `view`. The header always describes the full tree.
    pub fn export_view(&self, view: &Tree, with_stats: bool) -> String {
        export_text(self.root_name(), &self.built.stats, view, with_stats)
    }
}
