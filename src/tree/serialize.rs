//! Display rows and canonical text output.

use super::fold::FoldState;
use super::visit::{walk, Visit};
use super::{Stats, Tree};

const TEE: &str = "\u{251c}\u{2500}\u{2500} "; // ├──
const CORNER: &str = "\u{2514}\u{2500}\u{2500} "; // └──
const PIPE: &str = "\u{2502}   "; // │
const BLANK: &str = "    ";

/// What a display row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMarker {
    File,
    Folder { expanded: bool },
}

/// One entry of the display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub name: String,
    /// `/`-joined path from the root; the target for folder toggles.
    pub path: String,
    /// Indent level, 0 for top-level entries.
    pub depth: usize,
    pub marker: RowMarker,
    /// False when some ancestor folder is collapsed.
    pub visible: bool,
    /// Whether this is the last sibling in its parent group.
    pub is_last: bool,
}

impl DisplayRow {
    pub fn is_folder(&self) -> bool {
        matches!(self.marker, RowMarker::Folder { .. })
    }
}

/// Every node in sorted pre-order, with its fold state applied.
///
/// Rows below a collapsed folder are still emitted, flagged invisible.
pub fn display_rows(tree: &Tree, folds: &FoldState) -> Vec<DisplayRow> {
    let mut rows = Vec::new();
    // Depth of the outermost collapsed folder we are currently inside.
    let mut hidden_below: Option<usize> = None;
    walk(tree, &mut |v: &Visit<'_>| {
        if hidden_below.is_some_and(|d| v.depth <= d) {
            hidden_below = None;
        }
        let marker = if v.node.is_dir() {
            RowMarker::Folder {
                expanded: folds.is_expanded(v.path),
            }
        } else {
            RowMarker::File
        };
        rows.push(DisplayRow {
            name: v.node.name.clone(),
            path: v.path.to_string(),
            depth: v.depth,
            marker,
            visible: hidden_below.is_none(),
            is_last: v.is_last,
        });
        if hidden_below.is_none() && matches!(marker, RowMarker::Folder { expanded: false }) {
            hidden_below = Some(v.depth);
        }
        true
    });
    rows
}

/// Only the rows a viewer should draw.
pub fn visible_rows(tree: &Tree, folds: &FoldState) -> Vec<DisplayRow> {
    let mut rows = display_rows(tree, folds);
    rows.retain(|r| r.visible);
    rows
}

/// Tree-drawing prefix for a node: ancestor continuations plus its connector.
pub fn line_prefix(ancestors_last: &[bool], is_last: bool) -> String {
    let mut prefix = String::with_capacity((ancestors_last.len() + 1) * 4);
    for &last in ancestors_last {
        prefix.push_str(if last { BLANK } else { PIPE });
    }
    prefix.push_str(if is_last { CORNER } else { TEE });
    prefix
}

/// One line per node, using `├──`/`└──` connectors.
pub fn canonical_text(tree: &Tree) -> String {
    let mut text = String::new();
    walk(tree, &mut |v: &Visit<'_>| {
        text.push_str(&line_prefix(v.ancestors_last, v.is_last));
        text.push_str(&v.node.name);
        text.push('\n');
        true
    });
    text
}

/// The stats header used by exports.
pub fn stats_header(stats: &Stats) -> String {
    format!(
        "Files: {}\nFolders: {}\nFile Types: {}\n\n",
        stats.file_count(),
        stats.folder_count(),
        stats.distinct_extension_count()
    )
}

/// Full export: optional stats header, `root/`, then the canonical text.
pub fn export_text(root_name: &str, stats: &Stats, tree: &Tree, with_stats: bool) -> String {
    let mut out = String::new();
    if with_stats {
        out.push_str(&stats_header(stats));
    }
    out.push_str(root_name);
    out.push_str("/\n");
    out.push_str(&canonical_text(tree));
    out
}
