//! Validation of user-supplied report URLs.
//!
//! A detail view that receives something it cannot fetch should redirect
//! back to the dashboard instead of issuing a request; these checks let
//! front ends decide that up front.

use thiserror::Error;
use url::Url;

/// Why a report URL was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Malformed URL '{input}': {reason}")]
    Malformed { input: String, reason: String },

    #[error("Unsupported URL scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { scheme: String },
}

/// Parse a report URL, accepting only absolute `http`/`https` URLs.
///
/// # Examples
///
/// ```rust
/// use lysergic_core::utils::validation::validate_experience_url;
///
/// let url = validate_experience_url(" https://erowid.org/exp/exp.php?ID=1 ").unwrap();
/// assert_eq!(url.host_str(), Some("erowid.org"));
///
/// assert!(validate_experience_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_experience_url(raw: &str) -> Result<Url, UrlValidationError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::Malformed {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err(UrlValidationError::Malformed {
            input: input.to_string(),
            reason: "missing host".to_string(),
        }),
        other => Err(UrlValidationError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}
