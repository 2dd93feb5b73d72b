//! The sorted depth-first walk and the pruning pass shared by the
//! serializers, the stats recount, and the search filter.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::{Tree, TreeNode};

/// What a visitor sees for each node.
#[derive(Debug)]
pub struct Visit<'a> {
    pub node: &'a TreeNode,
    /// `/`-joined names from the root down to this node.
    pub path: &'a str,
    /// 0 for top-level entries.
    pub depth: usize,
    /// Whether this is the last sibling in display order.
    pub is_last: bool,
    /// `is_last` of every ancestor, outermost first.
    pub ancestors_last: &'a [bool],
}

/// Per-node callback for [`walk`]. Returning `false` skips the node's children.
pub trait Visitor {
    fn visit(&mut self, visit: &Visit<'_>) -> bool;
}

impl<F> Visitor for F
where
    F: FnMut(&Visit<'_>) -> bool,
{
    fn visit(&mut self, visit: &Visit<'_>) -> bool {
        self(visit)
    }
}

/// Walk the tree in pre-order, siblings sorted with [`compare_names`].
pub fn walk<V: Visitor + ?Sized>(tree: &Tree, visitor: &mut V) {
    let mut ancestors = Vec::new();
    walk_level(&tree.entries, "", &mut ancestors, visitor);
}

fn walk_level<V: Visitor + ?Sized>(
    children: &BTreeMap<String, TreeNode>,
    parent_path: &str,
    ancestors: &mut Vec<bool>,
    visitor: &mut V,
) {
    let sorted = sorted_children(children);
    let last = sorted.len().saturating_sub(1);
    for (i, node) in sorted.into_iter().enumerate() {
        let path = join_path(parent_path, &node.name);
        let is_last = i == last;
        let descend = visitor.visit(&Visit {
            node,
            path: &path,
            depth: ancestors.len(),
            is_last,
            ancestors_last: ancestors,
        });
        if descend && !node.children.is_empty() {
            ancestors.push(is_last);
            walk_level(&node.children, &path, ancestors, visitor);
            ancestors.pop();
        }
    }
}

/// Children in display order.
pub fn sorted_children(children: &BTreeMap<String, TreeNode>) -> Vec<&TreeNode> {
    let mut nodes: Vec<&TreeNode> = children.values().collect();
    nodes.sort_by(|a, b| compare_names(&a.name, &b.name));
    nodes
}

/// Display ordering of sibling names.
/// Case-insensitive alpha; on a tie lowercase sorts before uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Per-node outcome of a [`prune`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Keep the node with its whole original subtree.
    Keep,
    /// Keep the node only if some child survives, with just those children.
    Descend,
    Drop,
}

/// Derive a new tree, asking `decide` about each node top-down.
pub fn prune<F>(tree: &Tree, mut decide: F) -> Tree
where
    F: FnMut(&TreeNode) -> Decision,
{
    Tree {
        entries: prune_level(&tree.entries, &mut decide),
    }
}

fn prune_level<F>(
    children: &BTreeMap<String, TreeNode>,
    decide: &mut F,
) -> BTreeMap<String, TreeNode>
where
    F: FnMut(&TreeNode) -> Decision,
{
    let mut kept = BTreeMap::new();
    for (name, node) in children {
        match decide(node) {
            Decision::Keep => {
                kept.insert(name.clone(), node.clone());
            }
            Decision::Descend => {
                let survivors = prune_level(&node.children, decide);
                if !survivors.is_empty() {
                    kept.insert(
                        name.clone(),
                        TreeNode {
                            name: node.name.clone(),
                            kind: node.kind,
                            children: survivors,
                        },
                    );
                }
            }
            Decision::Drop => {}
        }
    }
    kept
}
