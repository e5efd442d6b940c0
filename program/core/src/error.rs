//! Fetch Errors
//!
//! Failures of the schedule and detail-resource fetches. These never escape
//! past the call site that handles them: schedule errors become a static
//! message in the view, detail errors are logged and dropped.

use thiserror::Error;

/// Errors that can occur while fetching a remote document
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or completed
    #[error("request to {url} failed: {source}")]
    Network {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read
    #[error("failed to read response body from {url}: {source}")]
    Body {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The body was not valid JSON
    #[error("failed to parse schedule document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but has no day list at the expected path
    #[error("schedule document has no day list at {path}")]
    MissingDays {
        /// The path that was expected to hold the day list
        path: &'static str,
    },

    /// A day entry is malformed (missing or non-string `date`)
    #[error("day entry {index} has no date")]
    InvalidDay {
        /// Position of the entry in the day list
        index: usize,
    },
}
