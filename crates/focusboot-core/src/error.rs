//! Error types for focusboot-core

use thiserror::Error;

/// Errors that abort the bootstrap.
///
/// An absent override document is not an error; it surfaces as
/// [`crate::overrides::OverrideDecision::Absent`].
#[derive(Error, Debug)]
pub enum BootError {
    /// The override request could not complete
    #[error("HTTP error: {0}")]
    Http(String),

    /// Override URL could not be built from the configured base URL
    #[error("Invalid override URL: {0}")]
    InvalidUrl(String),

    /// JSON was declared but the body is not an array of records
    #[error("Malformed override body: {0}")]
    MalformedOverrides(#[source] serde_json::Error),

    /// On-disk dataset could not be parsed
    #[error("Invalid dataset {name}: {source}")]
    InvalidDataset {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Host document has no element with the mount identifier
    #[error("Mount element not found: #{0}")]
    MountNotFound(String),

    /// Host document has more than one element with the mount identifier
    #[error("Mount element #{id} is ambiguous ({count} matches)")]
    AmbiguousMount { id: String, count: usize },

    /// The application runtime refused to start
    #[error("Runtime start failed: {0}")]
    RuntimeStart(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for BootError {
    fn from(err: reqwest::Error) -> Self {
        BootError::Http(err.to_string())
    }
}
