//! HTTP backend abstraction for the crawler API.
//!
//! The production implementation uses reqwest with automatic retry for
//! transient errors. Tests inject a fake backend with canned responses.

use crate::error::{ErowidError, ErowidResult};
use crate::models::{ErowidConfig, ErrorBody};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON with the crawler API.
///
/// This is an implementation detail - external code should use the
/// `ErowidClientPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// `GET` a URL and deserialize the JSON response.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ErowidResult<T>;

    /// `POST` a JSON body to a URL and deserialize the JSON response.
    async fn post_json<B, T>(&self, url: &Url, body: &B) -> ErowidResult<T>
    where
        B: Serialize + Send + Sync,
        T: DeserializeOwned + Send;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Retries 5xx responses and network errors with exponential backoff.
/// 4xx responses fail immediately.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
}

impl ReqwestBackend {
    pub fn new(config: &ErowidConfig) -> ErowidResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
        })
    }

    /// Send a request with automatic retry for transient errors.
    ///
    /// `build` is called once per attempt since a sent request is consumed.
    async fn send_with_retry<F>(&self, url: &Url, build: F) -> ErowidResult<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder + Send + Sync,
    {
        let mut last_error: Option<ErowidError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_base_delay_ms, attempt);
                tracing::debug!(%url, attempt, ?delay, "Retrying request");
                tokio::time::sleep(delay).await;
            }

            match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        tracing::warn!(%url, status = status.as_u16(), "Server error, will retry");
                        last_error = Some(ErowidError::ApiRequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                            detail: None,
                        });
                        continue;
                    }

                    // 4xx errors or final attempt - fail immediately
                    let detail = response
                        .json::<ErrorBody>()
                        .await
                        .ok()
                        .map(|body| body.message());
                    return Err(ErowidError::ApiRequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                        detail,
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        tracing::warn!(%url, error = %e, "Network error, will retry");
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ErowidError::InvalidResponse {
            message: "Unknown error during fetch".to_string(),
        }))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ErowidResult<T> {
        let response = self
            .send_with_retry(url, || self.client.get(url.as_str()))
            .await?;
        Ok(response.json().await?)
    }

    async fn post_json<B, T>(&self, url: &Url, body: &B) -> ErowidResult<T>
    where
        B: Serialize + Send + Sync,
        T: DeserializeOwned + Send,
    {
        let payload = serde_json::to_value(body)?;
        let response = self
            .send_with_retry(url, || self.client.post(url.as_str()).json(&payload))
            .await?;
        Ok(response.json().await?)
    }
}

/// Exponential backoff before retry `attempt` (1-based), saturating instead
/// of overflowing for large attempt counts.
fn backoff_delay(base_ms: u64, attempt: u8) -> Duration {
    let factor = 1u64
        .checked_shl(u32::from(attempt.saturating_sub(1)))
        .unwrap_or(u64::MAX);
    Duration::from_millis(base_ms.saturating_mul(factor))
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
