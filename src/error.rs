use thiserror::Error;

/// Result type for loading a dataset from a source.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Failures while collecting path records. A failed load never produces a
/// partial dataset.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The repository argument could not be split into owner and name.
    #[error("invalid repository '{0}': expected owner/repo or a URL ending in /owner/repo")]
    InvalidRepo(String),

    /// The request could not be sent or did not complete.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("failed to fetch repository: {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not a tree listing.
    #[error("failed to decode tree listing: {0}")]
    Decode(String),

    /// The local directory could not be walked.
    #[error("failed to read {path}: {message}")]
    Walk { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
