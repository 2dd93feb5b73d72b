#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pathtree::session::Session;
use pathtree::tree::{Dataset, PathRecord, PatternSet, Tree};
use std::fs;
use tempfile::TempDir;

/// File records for the given relative paths.
pub fn files(paths: &[&str]) -> Vec<PathRecord> {
    paths.iter().map(|p| PathRecord::file(*p)).collect()
}

/// A session with no exclusion patterns, loaded with the given files.
pub fn session_of(paths: &[&str]) -> Session {
    session_with(paths, PatternSet::empty())
}

pub fn session_with(paths: &[&str], patterns: PatternSet) -> Session {
    let mut session = Session::new(patterns);
    session.load(Dataset::new("proj", files(paths)));
    session
}

/// Names of the top-level entries, in map order.
pub fn top_names(tree: &Tree) -> Vec<&str> {
    tree.entries.keys().map(String::as_str).collect()
}

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ch(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}
