//! Typed access to the persistent cache.
//!
//! Services store JSON documents under fixed keys. Reads go through
//! [`read_json`], which folds every failure mode (missing, expired, corrupt,
//! storage error) into a cache miss so callers only ever see `Option<T>`.

mod memory;

pub use memory::MemoryCacheStore;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ports::CacheStore;

/// Cache key for the substance catalog.
pub const SUBSTANCES_KEY: &str = "substances";
/// Cache key for the flattened substance link list.
pub const SUBSTANCE_LINKS_KEY: &str = "substance_links";
/// Cache key for the bookmark list.
pub const BOOKMARKS_KEY: &str = "bookmarks";
/// Cache key for the story of the day.
pub const STORY_OF_THE_DAY_KEY: &str = "story_of_the_day";

/// Lifetime of the substance catalog and link caches (six 30-day months).
pub fn catalog_ttl() -> Duration {
    Duration::days(30 * 6)
}

/// Read and decode a cached JSON value.
///
/// Returns `None` if the key is absent, expired at `now`, unreadable or not
/// valid JSON for `T`.
pub async fn read_json<T>(store: &dyn CacheStore, key: &str, now: DateTime<Utc>) -> Option<T>
where
    T: DeserializeOwned,
{
    let entry = match store.get(key).await {
        Ok(Some(entry)) => entry,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Cache read failed");
            return None;
        }
    };

    if entry.is_expired(now) {
        tracing::debug!(key, "Cache entry expired");
        return None;
    }

    match serde_json::from_str(&entry.value) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding corrupt cache entry");
            None
        }
    }
}

/// Encode and store a JSON value. Returns whether the write succeeded.
pub async fn write_json<T>(
    store: &dyn CacheStore,
    key: &str,
    value: &T,
    expires_at: Option<DateTime<Utc>>,
) -> bool
where
    T: Serialize + ?Sized,
{
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to serialize cache value");
            return false;
        }
    };

    match store.set(key, json, expires_at).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "Cache write failed");
            false
        }
    }
}
