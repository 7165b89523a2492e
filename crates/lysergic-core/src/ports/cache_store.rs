//! Persistent key-value cache port.
//!
//! Replaces the browser's local storage: a flat string-keyed store whose
//! entries may carry an expiry timestamp. Expiry is *recorded* by the store
//! but *interpreted* by callers, which compare it against their own clock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// A stored value together with its optional expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Serialized payload (JSON for everything the services write).
    pub value: String,
    /// Instant from which the entry must be treated as absent.
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Create an entry.
    pub fn new(value: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// An entry is expired once `now >= expires_at`. Entries without an
    /// expiry never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| now >= expiry)
    }
}

/// Errors from cache store operations.
#[derive(Debug, Error)]
pub enum CacheStoreError {
    /// The backing storage failed.
    #[error("Cache storage error: {0}")]
    Storage(String),
}

/// Port for the persistent cache.
///
/// Implementations must be safe to share between components; no atomicity
/// is promised across separate calls.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read an entry, expired or not.
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheStoreError>;

    /// Insert or replace an entry.
    async fn set(
        &self,
        key: &str,
        value: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), CacheStoreError>;

    /// Remove an entry. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), CacheStoreError>;
}
