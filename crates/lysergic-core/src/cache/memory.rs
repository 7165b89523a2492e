//! In-memory `CacheStore`, used by tests and as a fallback when no
//! persistent store is configured.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::ports::{CacheEntry, CacheStore, CacheStoreError};

/// A `CacheStore` backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
    writes: AtomicUsize,
}

impl MemoryCacheStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry without going through the async API.
    pub fn insert_raw(
        &self,
        key: &str,
        value: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) {
        self.lock()
            .insert(key.to_string(), CacheEntry::new(value, expires_at));
    }

    /// Snapshot an entry without going through the async API.
    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.lock().get(key).cloned()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        // A poisoned map is still a valid map.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheStoreError> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), CacheStoreError> {
        self.lock()
            .insert(key.to_string(), CacheEntry::new(value, expires_at));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheStoreError> {
        self.lock().remove(key);
        Ok(())
    }
}
