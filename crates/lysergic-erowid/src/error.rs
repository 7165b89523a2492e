//! Internal error types for Erowid API operations.
//!
//! These errors are internal to `lysergic-erowid` and are mapped to core
//! port errors at the boundary.

use thiserror::Error;

/// Result type alias for Erowid API operations.
pub type ErowidResult<T> = Result<T, ErowidError>;

#[derive(Debug, Error)]
pub enum ErowidError {
    /// API request failed with an HTTP error status.
    #[error("Erowid API request failed with status {status}: {url}{}", detail_suffix(.detail.as_deref()))]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// The server's `detail` message, if it sent one
        detail: Option<String>,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from Erowid API: {message}")]
    InvalidResponse { message: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(" ({d})")).unwrap_or_default()
}
