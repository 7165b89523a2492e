//! `SQLite` implementation of the `CacheStore` port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use lysergic_core::{CacheEntry, CacheStore, CacheStoreError};

/// `CacheStore` backed by the `cache_kv` table.
///
/// Values are opaque strings; expiry is stored alongside and interpreted
/// by callers.
pub struct SqliteCacheStore {
    pool: SqlitePool,
}

impl SqliteCacheStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Delete every entry whose expiry is at or before `now`.
    ///
    /// Returns the number of rows removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, CacheStoreError> {
        let result =
            sqlx::query("DELETE FROM cache_kv WHERE expires_at IS NOT NULL AND expires_at <= ?")
                .bind(now)
                .execute(&self.pool)
                .await
                .map_err(storage)?;

        let removed = result.rows_affected();
        if removed > 0 {
            tracing::debug!(removed, "Purged expired cache entries");
        }
        Ok(removed)
    }
}

fn storage(e: sqlx::Error) -> CacheStoreError {
    CacheStoreError::Storage(e.to_string())
}

#[async_trait]
impl CacheStore for SqliteCacheStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheStoreError> {
        let row = sqlx::query("SELECT value, expires_at FROM cache_kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        row.map(|r| {
            let value: String = r.try_get("value").map_err(storage)?;
            let expires_at: Option<DateTime<Utc>> = r.try_get("expires_at").map_err(storage)?;
            Ok(CacheEntry::new(value, expires_at))
        })
        .transpose()
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), CacheStoreError> {
        sqlx::query(
            "INSERT OR REPLACE INTO cache_kv (key, value, expires_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(key)
        .bind(value)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheStoreError> {
        sqlx::query("DELETE FROM cache_kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(storage)?;
        Ok(())
    }
}
