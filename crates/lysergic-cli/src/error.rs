//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from core errors to exit codes and user-facing messages.

use lysergic_core::{ErowidPortError, PathError, UrlValidationError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The requested report or page does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The crawler server could not be reached or answered with an error.
    #[error("Server unavailable: {0}")]
    Unavailable(String),

    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 66,    // EX_NOINPUT
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<ErowidPortError> for CliError {
    fn from(err: ErowidPortError) -> Self {
        match err {
            ErowidPortError::NotFound { url } => Self::NotFound(url),
            ErowidPortError::Configuration { message } => Self::Config(message),
            other => Self::Unavailable(other.to_string()),
        }
    }
}

impl From<UrlValidationError> for CliError {
    fn from(err: UrlValidationError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error bubbled up to `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_errors_map_to_exit_codes() {
        let not_found = CliError::from(ErowidPortError::NotFound {
            url: "https://e.org/x".to_string(),
        });
        assert_eq!(not_found.exit_code(), 66);

        let offline = CliError::from(ErowidPortError::Network {
            message: "connection refused".to_string(),
        });
        assert_eq!(offline.exit_code(), 69);
        assert!(offline.to_string().contains("connection refused"));
    }

    #[test]
    fn test_invalid_url_is_usage_error() {
        let err = CliError::from(UrlValidationError::Empty);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_for_anyhow() {
        let wrapped = anyhow::Error::new(CliError::Io("disk full".to_string()));
        assert_eq!(exit_code_for(&wrapped), 74);
        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), 1);
    }
}
