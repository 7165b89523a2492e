//! Erowid crawler API client.

mod catalog;
mod experience;
mod feed;

use crate::config::ErowidClientConfig;
use crate::error::ErowidResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::ErowidConfig;
use url::Url;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default client using the reqwest HTTP backend.
pub type DefaultErowidClient = ErowidClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the crawler API.
///
/// Generic over an HTTP backend so tests can inject canned responses. Use
/// `DefaultErowidClient::new()` in production and talk to it through
/// `ErowidClientPort`.
pub struct ErowidClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: ErowidConfig,
}

impl DefaultErowidClient {
    /// Create a client from the public configuration.
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be
    /// built.
    pub fn new(config: &ErowidClientConfig) -> ErowidResult<Self> {
        let internal_config = Self::to_internal_config(config)?;
        let backend = ReqwestBackend::new(&internal_config)?;
        Ok(Self {
            backend,
            config: internal_config,
        })
    }

    fn to_internal_config(config: &ErowidClientConfig) -> ErowidResult<ErowidConfig> {
        Ok(ErowidConfig {
            base_url: Url::parse(&config.base_url)?,
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            max_retries: config.max_retries,
            #[allow(clippy::cast_possible_truncation)] // Duration milliseconds won't exceed u64 in practice
            retry_base_delay_ms: config.retry_base_delay.as_millis() as u64,
        })
    }
}

impl<B: HttpBackend> ErowidClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: ErowidConfig, backend: B) -> Self {
        Self { backend, config }
    }
}
