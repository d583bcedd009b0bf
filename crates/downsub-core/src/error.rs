//! Error types for the DownSub caption scraper
//!
//! Provides a single error enum with human-readable messages, a closed
//! classification into failure categories, and string serialization so
//! a surrounding service can hand errors straight to its callers.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all caption scraping operations
#[derive(Error, Debug)]
pub enum DownsubError {
    /// Headless browser failed to start or open its page
    #[error("Browser launch failed: {0}")]
    Launch(String),

    /// Navigation did not capture an endpoint before the deadline
    #[error("Page load timed out after {timeout_ms} ms")]
    NavigationTimeout { timeout_ms: u64 },

    /// The browser navigation itself failed
    #[error("{}", describe_navigation_failure(.name, .message))]
    Navigation { name: String, message: String },

    /// Navigation settled but no request matched the caption API pattern
    #[error("Failed to capture caption API endpoint")]
    EndpointNotCaptured,

    /// Transport-level failure while fetching the captured endpoint
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Captured endpoint answered with a non-2xx status
    #[error("API request failed: {0}")]
    FetchStatus(u16),

    /// Captured endpoint answered with a body that is not the expected JSON
    #[error("Malformed caption API response: {0}")]
    MalformedResponse(String),

    /// Aggregator reported a provider other than the expected one
    #[error("Unsupported video source: {0}")]
    UnsupportedSource(String),

    /// Invalid source video URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configured interception pattern is not a valid regex
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// DevTools protocol failure while resolving an intercepted request
    #[error("Browser protocol error: {0}")]
    Browser(String),
}

/// Failure category of a [`DownsubError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Launch,
    NavigationTimeout,
    Navigation,
    EndpointNotCaptured,
    Fetch,
    UnsupportedSource,
    InvalidInput,
}

impl DownsubError {
    /// Classifies the error into its failure category
    pub fn kind(&self) -> ErrorKind {
        match self {
            DownsubError::Launch(_) => ErrorKind::Launch,
            DownsubError::NavigationTimeout { .. } => ErrorKind::NavigationTimeout,
            DownsubError::Navigation { .. } | DownsubError::Browser(_) => ErrorKind::Navigation,
            DownsubError::EndpointNotCaptured => ErrorKind::EndpointNotCaptured,
            DownsubError::HttpError(_)
            | DownsubError::FetchStatus(_)
            | DownsubError::MalformedResponse(_) => ErrorKind::Fetch,
            DownsubError::UnsupportedSource(_) => ErrorKind::UnsupportedSource,
            DownsubError::InvalidUrl(_) | DownsubError::InvalidPattern(_) => {
                ErrorKind::InvalidInput
            }
        }
    }
}

/// Maps a navigation failure name to its message
///
/// Only a fixed set of names get a dedicated message; every other name
/// falls through to a generic message carrying the underlying detail.
pub fn describe_navigation_failure(name: &str, message: &str) -> String {
    match name {
        "TimeoutError" => "Page load timed out".to_string(),
        "ERR_CONNECTION_REFUSED" => "Connection refused".to_string(),
        _ => format!("Scrape failed: {}", message),
    }
}

impl Serialize for DownsubError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for caption scraping operations
pub type Result<T> = std::result::Result<T, DownsubError>;
