//! Command handlers that delegate to `LysergicCore`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call core service methods
//!   3. Format output for the terminal
//!
//! Handlers should NOT:
//! - Access the cache store or HTTP client directly
//! - Contain business logic

pub mod bookmarks;
pub mod explore;
pub mod feed;
pub mod paths;
pub mod read;
pub mod story;
pub mod substances;

use anyhow::Result;
use lysergic_core::validate_experience_url;

use crate::error::CliError;

/// Validate a report URL argument, returning it in canonical form.
pub(crate) fn checked_url(raw: &str) -> Result<String> {
    let url = validate_experience_url(raw).map_err(CliError::from)?;
    Ok(url.to_string())
}
