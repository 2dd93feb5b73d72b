//! End-to-end pass over the library pipeline:
//! 1. Walks a realistic project fixture from disk
//! 2. Builds, searches, folds and exports through a `Session`
//! 3. Drives the viewer state with keys and checks rendered lines
//!
//! Run with tracing output:
//!   RUST_LOG=debug cargo test --test final_integration -- --nocapture

mod common;

use common::{ch, create_fixture, key};
use crossterm::event::KeyCode;
use pathtree::config::AppConfig;
use pathtree::event_loop::AppState;
use pathtree::render::{line_to_plain_text, rows_to_lines, status_bar_line, RenderConfig};
use pathtree::session::Session;
use pathtree::source::{DatasetSource, Source};
use pathtree::tree::Stats;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_target(false)
        .with_test_writer()
        .try_init();
}

const PROJECT: &[&str] = &[
    "app/src/main.rs",
    "app/src/ui/view.rs",
    "app/src/ui/Theme.rs",
    "app/tests/smoke.rs",
    "app/README.md",
    "app/Makefile",
    "app/target/debug/app",
    "app/node_modules/left-pad/index.js",
    "app/.git/config",
];

#[test]
fn test_full_pipeline() {
    init_tracing();
    let tmp = create_fixture(PROJECT);
    let source = Source::Dir {
        path: tmp.path().join("app"),
        follow_symlinks: false,
    };

    let config = AppConfig::parse("[patterns]\nextra = [\"tests\"]\n").unwrap();
    let mut session = Session::new(config.pattern_set(false, false, &[]));
    session.load(source.load().unwrap());
    info!(nodes = session.tree().node_count(), "built tree");

    // Exclusions: defaults plus the configured extra.
    for gone in ["target", "node_modules", ".git", "tests"] {
        assert!(session.tree().get(gone).is_none(), "{gone} should be excluded");
    }
    assert_eq!(session.stats().file_count(), 5);
    assert_eq!(session.stats().folder_count(), 2);
    // rs, md, and "unknown" for Makefile
    assert_eq!(session.stats().distinct_extension_count(), 3);
    assert_eq!(session.stats(), &Stats::of(session.tree()));

    let expected = "\
Files: 5
Folders: 2
File Types: 3

app/
├── Makefile
├── README.md
└── src
    ├── main.rs
    └── ui
        ├── Theme.rs
        └── view.rs
";
    assert_eq!(session.export(true), expected);

    // Search keeps ancestors; header still shows the full stats.
    let view = session.search("theme");
    let searched = session.export_view(&view, true);
    assert!(searched.starts_with("Files: 5\n"));
    assert!(searched.ends_with("app/\n└── src\n    └── ui\n        └── Theme.rs\n"));

    // Removing a default pattern brings excluded data back.
    assert!(session.remove_pattern("target"));
    assert!(session.tree().get("target/debug/app").is_some());
    assert_eq!(session.stats().file_count(), 6);
}

#[test]
fn test_viewer_renders_session() {
    init_tracing();
    let tmp = create_fixture(PROJECT);
    let source = Source::Dir {
        path: tmp.path().join("app"),
        follow_symlinks: false,
    };
    let mut session = Session::new(AppConfig::default().pattern_set(false, false, &[]));
    session.load(source.load().unwrap());

    let cfg = RenderConfig { use_color: false };
    let mut state = AppState::new(session, source.describe(), cfg);

    // Collapse src, then render the visible rows.
    state.handle_key(key(KeyCode::End));
    state.handle_key(ch('c'));
    let lines: Vec<String> = rows_to_lines(state.rows(), &cfg, None)
        .iter()
        .map(line_to_plain_text)
        .collect();
    assert_eq!(
        lines,
        vec!["  Makefile", "  README.md", "\u{25b8} src/", "\u{25b8} tests/"]
    );

    state.handle_key(ch('/'));
    for c in "view".chars() {
        state.handle_key(ch(c));
    }
    state.handle_key(key(KeyCode::Enter));
    let status = line_to_plain_text(&status_bar_line(
        "app",
        state.session().stats(),
        state.query(),
        state.message(),
    ));
    assert!(status.contains("Files: 6  Folders: 3  File Types: 3"));
    assert!(status.contains("Search: view"));
}

#[test]
fn test_large_listing_builds_quickly() {
    init_tracing();
    let mut paths = Vec::new();
    for d in 0..50 {
        for f in 0..200 {
            paths.push(format!("dir{d}/sub{}/file{f}.ext{}", f % 10, f % 7));
        }
    }
    let refs: Vec<&str> = paths.iter().map(String::as_str).collect();

    let start = Instant::now();
    let session = common::session_of(&refs);
    let text = session.export(true);
    let elapsed = start.elapsed();
    info!(?elapsed, bytes = text.len(), "built and exported 10k paths");

    assert_eq!(session.stats().file_count(), 10_000);
    assert_eq!(session.stats().folder_count(), 50 + 50 * 10);
    assert_eq!(session.stats().distinct_extension_count(), 7);
    assert!(elapsed.as_secs() < 10);
}
