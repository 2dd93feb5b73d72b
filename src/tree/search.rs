use super::visit::{prune, Decision};
use super::Tree;

/// Keep nodes whose name contains `query` (case-insensitive), together with
/// their whole subtree, plus every ancestor of such a node.
///
/// Directories that neither match nor contain a match are dropped, as are
/// non-matching files. An empty query keeps everything. The source tree is
/// never modified.
pub fn filter(tree: &Tree, query: &str) -> Tree {
    let needle = query.to_lowercase();
    prune(tree, |node| {
        if node.name.to_lowercase().contains(&needle) {
            Decision::Keep
        } else if node.is_dir() {
            Decision::Descend
        } else {
            Decision::Drop
        }
    })
}
