//! Settings for reaching the crawler API.
//!
//! Converted into the transport's own settings when the client is built.

use std::time::Duration;

/// Default API base when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Configuration for the Erowid API client.
///
/// # Example
///
/// ```
/// use lysergic_erowid::ErowidClientConfig;
/// use std::time::Duration;
///
/// let config = ErowidClientConfig::new()
///     .with_base_url("https://lysergic.example/api/v1")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ErowidClientConfig {
    /// Base URL of the crawler API (the `/erowid/...` routes hang off it)
    pub(crate) base_url: String,
    /// Sent as `User-Agent`; defaults to `lysergic/<version>`
    pub(crate) user_agent: String,
    /// Per-request deadline, connect included
    pub(crate) timeout: Duration,
    /// Extra attempts after a 5xx or connection failure
    pub(crate) max_retries: u8,
    /// First backoff step; doubles on each further attempt
    pub(crate) retry_base_delay: Duration,
}

impl Default for ErowidClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("lysergic/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl ErowidClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the crawler API.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attempts made after the first on 5xx and network errors (default 3).
    /// Zero disables retrying.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// First retry waits this long (default 500ms).
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
