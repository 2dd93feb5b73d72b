//! Configuration: TOML file loading with CLI overrides.
//!
//! Resolution order (first file found wins, CLI flags override its values):
//! 1. `--config <FILE>`
//! 2. `$PATHTREE_CONFIG`
//! 3. Project-local `.pathtree.toml` in the current working directory
//! 4. Global `<config_dir>/pathtree/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::source::github::{self, FetchOptions};
use crate::tree::{MatchMode, PatternSet};

/// Exclusion pattern settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PatternsConfig {
    /// Start from the built-in default patterns.
    pub use_defaults: Option<bool>,
    /// Extra patterns appended after the defaults.
    pub extra: Vec<String>,
    /// Match patterns as globs instead of literal names.
    pub glob: Option<bool>,
}

/// Remote repository settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GithubConfig {
    pub branch: Option<String>,
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: Option<bool>,
}

/// Top-level configuration. Every field is optional.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub patterns: PatternsConfig,
    pub github: GithubConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load from the explicit path if given, else from the first candidate
    /// location that exists and parses. Falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> AppConfig {
        if let Some(path) = explicit {
            return load_file(path).unwrap_or_default();
        }
        candidate_paths()
            .iter()
            .find_map(|p| load_file(p))
            .unwrap_or_default()
    }

    pub fn parse(content: &str) -> Result<AppConfig, toml::de::Error> {
        toml::from_str(content)
    }

    /// Pattern set per this config, with CLI additions applied on top.
    pub fn pattern_set(&self, no_defaults: bool, glob: bool, cli_extra: &[String]) -> PatternSet {
        let use_defaults = !no_defaults && self.patterns.use_defaults.unwrap_or(true);
        let mut set = if use_defaults {
            PatternSet::with_defaults()
        } else {
            PatternSet::empty()
        };
        if glob || self.patterns.glob.unwrap_or(false) {
            set.set_mode(MatchMode::Glob);
        }
        for pattern in self.patterns.extra.iter().chain(cli_extra) {
            set.add(pattern);
        }
        set
    }

    /// Fetch options per this config, with a CLI branch override.
    pub fn fetch_options(&self, cli_branch: Option<&str>) -> FetchOptions {
        FetchOptions {
            api_base: self
                .github
                .api_base
                .clone()
                .unwrap_or_else(|| github::DEFAULT_API_BASE.to_string()),
            branch: cli_branch
                .map(str::to_string)
                .or_else(|| self.github.branch.clone())
                .unwrap_or_else(|| github::DEFAULT_BRANCH.to_string()),
            timeout: self
                .github
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(github::DEFAULT_TIMEOUT),
        }
    }

    pub fn use_color(&self, cli_no_color: bool) -> bool {
        !cli_no_color && self.display.color.unwrap_or(true)
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(env_path) = std::env::var("PATHTREE_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".pathtree.toml"));
    }
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("pathtree").join("config.toml"));
    }
    paths
}

/// Read and parse one config file. Missing files are silent; parse errors
/// are logged and skipped.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match AppConfig::parse(&content) {
        Ok(cfg) => {
            tracing::debug!(path = %path.display(), "loaded config");
            Some(cfg)
        }
        Err(e) => {
            tracing::warn!("failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = AppConfig::parse("").unwrap();
        let set = cfg.pattern_set(false, false, &[]);
        assert!(set.contains("node_modules"));
        assert_eq!(set.mode(), MatchMode::Literal);
        let opts = cfg.fetch_options(None);
        assert_eq!(opts.branch, "main");
        assert_eq!(opts.api_base, github::DEFAULT_API_BASE);
        assert!(cfg.use_color(false));
    }

    #[test]
    fn file_values_and_cli_overrides() {
        let cfg = AppConfig::parse(
            r#"
            [patterns]
            use_defaults = false
            extra = ["vendor", "*.bak"]
            glob = true

            [github]
            branch = "develop"
            timeout_secs = 5

            [display]
            color = false
            "#,
        )
        .unwrap();

        let set = cfg.pattern_set(false, false, &["tmp, cache".to_string()]);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["vendor", "*.bak", "tmp", "cache"]
        );
        assert_eq!(set.mode(), MatchMode::Glob);

        assert_eq!(cfg.fetch_options(None).branch, "develop");
        assert_eq!(cfg.fetch_options(Some("main")).branch, "main");
        assert_eq!(cfg.fetch_options(None).timeout, Duration::from_secs(5));
        assert!(!cfg.use_color(false));
    }

    #[test]
    fn no_defaults_flag_wins() {
        let cfg = AppConfig::default();
        assert!(cfg.pattern_set(true, false, &[]).is_empty());
    }

    #[test]
    fn explicit_missing_file_falls_back() {
        let cfg = AppConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(cfg.patterns.extra.is_empty());
    }
}
