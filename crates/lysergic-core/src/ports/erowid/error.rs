//! Error types for Erowid API port operations.

use thiserror::Error;

/// Errors from Erowid API port operations.
///
/// These are domain-level errors that consumers can handle.
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
#[derive(Debug, Error)]
pub enum ErowidPortError {
    /// The requested resource does not exist on the server.
    #[error("Not found: {url}")]
    NotFound {
        /// The URL that was requested
        url: String,
    },

    /// The server is throttling requests.
    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    /// The server answered with an error status.
    #[error("Server error {status}: {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Detail returned by the server, if any
        message: String,
    },

    /// Network or connectivity error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// Invalid response from the API.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// Configuration error (bad base URL and the like).
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Result type alias for Erowid port operations.
pub type ErowidPortResult<T> = Result<T, ErowidPortError>;
