//! Remote source: the recursive tree listing of a GitHub repository.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, SourceError};
use crate::tree::{Dataset, PathRecord};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Owner and name of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Accepts `owner/repo` or any URL whose last two path components are
    /// the owner and the repository. A trailing `/` or `.git` is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim().trim_end_matches('/');
        let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
        let parts: Vec<&str> = trimmed.split('/').filter(|p| !p.is_empty()).collect();
        match parts.as_slice() {
            [.., owner, name] if !owner.ends_with(':') => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(SourceError::InvalidRepo(input.to_string())),
        }
    }
}

/// Where and how to fetch a listing.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub api_base: String,
    pub branch: String,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// `{base}/repos/{owner}/{repo}/git/trees/{branch}?recursive=1`
pub fn tree_url(repo: &RepoRef, opts: &FetchOptions) -> String {
    format!(
        "{}/repos/{}/{}/git/trees/{}?recursive=1",
        opts.api_base.trim_end_matches('/'),
        repo.owner,
        repo.name,
        opts.branch
    )
}

#[derive(Debug, Deserialize)]
struct TreeListing {
    tree: Vec<TreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Decode a tree-listing response body. `blob` entries become files and
/// `tree` entries directories; anything else (submodule commits) is skipped.
pub fn parse_listing(body: &str) -> Result<Vec<PathRecord>> {
    let listing: TreeListing =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    if listing.truncated {
        tracing::warn!("tree listing was truncated by the server; the tree is incomplete");
    }
    Ok(listing
        .tree
        .into_iter()
        .filter_map(|item| match item.kind.as_str() {
            "blob" => Some(PathRecord::file(item.path)),
            "tree" => Some(PathRecord::dir(item.path)),
            other => {
                tracing::trace!(path = %item.path, kind = other, "skipping listing entry");
                None
            }
        })
        .collect())
}

/// Fetch a repository listing. Any failure is returned whole; no partial
/// dataset is ever produced.
pub fn fetch(repo: &RepoRef, opts: &FetchOptions) -> Result<Dataset> {
    let url = tree_url(repo, opts);
    let request_err = |source: reqwest::Error| SourceError::Request {
        url: url.clone(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(opts.timeout)
        .user_agent(format!("pathtree/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(request_err)?;

    tracing::info!(%url, "fetching repository tree");
    let resp = client
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .send()
        .map_err(request_err)?;

    let status = resp.status();
    if !status.is_success() {
        tracing::warn!(%url, %status, "repository fetch failed");
        return Err(SourceError::Status { url, status });
    }

    let body = resp.text().map_err(request_err)?;
    let records = parse_listing(&body)?;
    tracing::info!(entries = records.len(), "fetched repository tree");
    Ok(Dataset::new(repo.name.clone(), records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_owner_repo() {
        let r = RepoRef::parse("rust-lang/cargo").unwrap();
        assert_eq!(r.owner, "rust-lang");
        assert_eq!(r.name, "cargo");
    }

    #[test]
    fn parse_url_forms() {
        for input in [
            "https://github.com/rust-lang/cargo",
            "https://github.com/rust-lang/cargo/",
            "https://github.com/rust-lang/cargo.git",
        ] {
            let r = RepoRef::parse(input).unwrap();
            assert_eq!((r.owner.as_str(), r.name.as_str()), ("rust-lang", "cargo"));
        }
    }

    #[test]
    fn parse_rejects_single_component() {
        assert!(matches!(
            RepoRef::parse("cargo"),
            Err(SourceError::InvalidRepo(_))
        ));
        assert!(RepoRef::parse("https://github.com").is_err());
        assert!(RepoRef::parse("").is_err());
    }

    #[test]
    fn url_shape() {
        let repo = RepoRef::parse("o/r").unwrap();
        let opts = FetchOptions {
            api_base: "https://example.test/".into(),
            branch: "dev".into(),
            ..FetchOptions::default()
        };
        assert_eq!(
            tree_url(&repo, &opts),
            "https://example.test/repos/o/r/git/trees/dev?recursive=1"
        );
    }

    #[test]
    fn listing_maps_types() {
        let body = r#"{
            "sha": "abc",
            "tree": [
                {"path": "src", "type": "tree", "mode": "040000"},
                {"path": "src/lib.rs", "type": "blob", "mode": "100644"},
                {"path": "vendor/dep", "type": "commit", "mode": "160000"}
            ],
            "truncated": false
        }"#;
        let records = parse_listing(body).unwrap();
        assert_eq!(
            records,
            vec![PathRecord::dir("src"), PathRecord::file("src/lib.rs")]
        );
    }

    #[test]
    fn listing_decode_error() {
        assert!(matches!(
            parse_listing(r#"{"message": "Not Found"}"#),
            Err(SourceError::Decode(_))
        ));
    }
}
