//! Where path records come from.

pub mod github;
pub mod local;

use std::path::PathBuf;

use crate::error::Result;
use crate::tree::Dataset;

pub use github::{FetchOptions, RepoRef};
pub use local::{ListLayout, SelectedEntry};

/// Abstraction over dataset loading so the viewer can reload, and tests can
/// swap in a fixed dataset.
pub trait DatasetSource: Send + Sync {
    fn load(&self) -> Result<Dataset>;

    /// Short human-readable label for status lines.
    fn describe(&self) -> String;
}

/// The sources the command line can select.
#[derive(Debug, Clone)]
pub enum Source {
    /// Every file below a local directory.
    Dir { path: PathBuf, follow_symlinks: bool },
    /// A GitHub repository's recursive tree listing.
    Github { repo: RepoRef, options: FetchOptions },
    /// A dataset read once up front (e.g. a path list from stdin).
    Fixed(Dataset),
}

impl DatasetSource for Source {
    fn load(&self) -> Result<Dataset> {
        match self {
            Source::Dir {
                path,
                follow_symlinks,
            } => local::walk_dir(path, *follow_symlinks),
            Source::Github { repo, options } => github::fetch(repo, options),
            Source::Fixed(dataset) => Ok(dataset.clone()),
        }
    }

    fn describe(&self) -> String {
        match self {
            Source::Dir { path, .. } => path.display().to_string(),
            Source::Github { repo, options } => {
                format!("{}/{}@{}", repo.owner, repo.name, options.branch)
            }
            Source::Fixed(dataset) => dataset.root_name.clone(),
        }
    }
}
