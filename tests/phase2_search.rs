mod common;

use common::files;
use pathtree::tree::{build, filter, PatternSet, Tree};

fn sample() -> Tree {
    build(
        &files(&[
            "src/components/Button.tsx",
            "src/components/Modal.tsx",
            "src/utils/format.ts",
            "src/index.ts",
            "tests/button.test.ts",
            "README.md",
        ]),
        &PatternSet::empty(),
    )
    .tree
}

#[test]
fn test_empty_query_keeps_every_node() {
    let tree = sample();
    let found = filter(&tree, "");
    assert_eq!(found.node_count(), tree.node_count());
    assert_eq!(found, tree);
}

#[test]
fn test_unmatched_query_yields_empty_tree() {
    let found = filter(&sample(), "does-not-exist");
    assert!(found.is_empty());
    assert_eq!(found.node_count(), 0);
}

#[test]
fn test_match_is_case_insensitive_substring() {
    let found = filter(&sample(), "BUTTON");
    assert!(found.get("src/components/Button.tsx").is_some());
    assert!(found.get("tests/button.test.ts").is_some());
    assert!(found.get("src/components/Modal.tsx").is_none());
    assert!(found.get("README.md").is_none());
}

#[test]
fn test_every_ancestor_of_a_match_is_kept() {
    let found = filter(&sample(), "format");
    for path in ["src", "src/utils", "src/utils/format.ts"] {
        assert!(found.get(path).is_some(), "{path} should survive");
    }
    assert_eq!(found.node_count(), 3);
    assert!(found.get("src/index.ts").is_none());
}

#[test]
fn test_matching_directory_keeps_whole_subtree() {
    let tree = sample();
    let found = filter(&tree, "components");
    assert_eq!(
        found.get("src/components"),
        tree.get("src/components"),
        "wholesale inclusion keeps the original children"
    );
    assert!(found.get("src/utils").is_none());
}

#[test]
fn test_search_does_not_modify_source() {
    let tree = sample();
    let before = tree.clone();
    let _ = filter(&tree, "modal");
    assert_eq!(tree, before);
}
