//! Error types for the outline scraper.
//!
//! Batch-level conditions (`ScrapeError`) are fatal and surface through
//! `main`; per-URL conditions (`FetchError`) are contained by the batch
//! runner and only ever reach the user as a diagnostic line.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort the run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The URL list file does not exist.
    #[error("URL list file not found: {}", .0.display())]
    MissingUrlFile(PathBuf),

    /// The URL list file exists but could not be read.
    #[error("failed to read URL list {}: {source}", path.display())]
    UrlFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The URL list contains no URLs.
    #[error("URL list contains no URLs")]
    EmptyInput,

    /// Every fetch in the batch failed; there is nothing to report.
    #[error("all {0} pages failed to fetch; no report written")]
    NoResults(usize),
}

/// Per-URL fetch failures. Never aborts the batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out: {0}")]
    Timeout(reqwest::Error),

    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("transport error: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e)
        } else if let Some(status) = e.status() {
            FetchError::Status(status)
        } else {
            FetchError::Transport(e)
        }
    }
}
