//! Tracing subscriber setup.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count. `None` means quiet.
pub fn level_for(verbosity: Option<u8>) -> &'static str {
    match verbosity {
        None => "error",
        Some(0) => "warn",
        Some(1) => "info",
        Some(2) => "debug",
        Some(_) => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the verbosity.
///
/// Logs go to `log_file` when given, else to stderr. In interactive mode
/// without a log file nothing is logged, so the screen stays intact.
pub fn init(verbosity: Option<u8>, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // try_init: a subscriber may already be set (tests).
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("{}: failed to open log file", path.display()))?;
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None if interactive => {}
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
    Ok(())
}
