//! Feed cache manager - catalog caching and the deduplicated experience feed.
//!
//! The manager owns three pieces of state:
//!
//! - the substance catalog and its derived link list, persisted through a
//!   [`CacheStore`] with a six-month expiry;
//! - the in-memory feed, grown by appending url-unique batches;
//! - a [`FeedPhase`] plus an append flag that enforce single-flight loading.
//!
//! Phase flags are flipped under a `std::sync::Mutex` before any `.await`,
//! and the lock is never held across one, so two callers racing on
//! [`FeedCacheManager::refresh_feed`] resolve to exactly one fetch sequence.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{SUBSTANCE_LINKS_KEY, SUBSTANCES_KEY, catalog_ttl, read_json, write_json};
use crate::domain::{ExperienceSummary, Feed, SubstanceCatalog};
use crate::ports::{CacheStore, Clock, ErowidClientPort, SystemClock};

/// Maximum number of batch requests issued by one initial feed load.
pub const FEED_RETRY_BUDGET: usize = 5;

/// Sizing knobs for feed loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// Target size of the initial feed.
    pub initial_size: usize,
    /// Reports sampled per substance by [`FeedCacheManager::append_page`].
    pub page_size: u32,
    /// Batch requests allowed for the initial load.
    pub retry_budget: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_size: 10,
            page_size: 5,
            retry_budget: FEED_RETRY_BUDGET,
        }
    }
}

/// Lifecycle of the one-shot initial feed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// No initial load has been attempted.
    NotStarted,
    /// The initial load is in flight.
    Loading,
    /// The initial load finished (whether or not it reached its target size).
    Loaded,
}

#[derive(Debug)]
struct FeedState {
    phase: FeedPhase,
    appending: bool,
    feed: Feed,
}

/// Loads and caches the substance catalog and produces the experience feed.
pub struct FeedCacheManager {
    client: Arc<dyn ErowidClientPort>,
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    config: FeedConfig,
    state: Mutex<FeedState>,
}

impl FeedCacheManager {
    /// Create a manager using the system clock.
    pub fn new(client: Arc<dyn ErowidClientPort>, store: Arc<dyn CacheStore>) -> Self {
        Self::with_clock(client, store, Arc::new(SystemClock))
    }

    /// Create a manager with an injected clock.
    pub fn with_clock(
        client: Arc<dyn ErowidClientPort>,
        store: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            store,
            clock,
            config: FeedConfig::default(),
            state: Mutex::new(FeedState {
                phase: FeedPhase::NotStarted,
                appending: false,
                feed: Feed::new(),
            }),
        }
    }

    /// Replace the sizing configuration.
    #[must_use]
    pub fn with_config(mut self, config: FeedConfig) -> Self {
        self.config = FeedConfig {
            retry_budget: config.retry_budget.max(1),
            ..config
        };
        self
    }

    pub const fn config(&self) -> &FeedConfig {
        &self.config
    }

    // ── Catalog ────────────────────────────────────────────────────

    /// Return the substance catalog, fetching it if the cache is cold.
    ///
    /// A cached catalog is used until it expires. A failed fetch leaves the
    /// cache untouched and yields `None`.
    pub async fn ensure_substance_catalog(&self) -> Option<SubstanceCatalog> {
        let now = self.clock.now();
        if let Some(catalog) =
            read_json::<SubstanceCatalog>(self.store.as_ref(), SUBSTANCES_KEY, now).await
        {
            tracing::debug!(substances = catalog.len(), "Substance catalog cache hit");
            return Some(catalog);
        }

        tracing::info!("Fetching substance catalog");
        match self.client.substances().await {
            Ok(catalog) => {
                write_json(
                    self.store.as_ref(),
                    SUBSTANCES_KEY,
                    &catalog,
                    Some(now + catalog_ttl()),
                )
                .await;
                tracing::info!(substances = catalog.len(), "Substance catalog cached");
                Some(catalog)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch substances");
                None
            }
        }
    }

    /// Return the flattened substance link list, deriving it if needed.
    ///
    /// The derived list is persisted only when non-empty. The result may be
    /// empty if the catalog is unavailable or carries no links.
    pub async fn ensure_link_catalog(&self) -> Vec<String> {
        let now = self.clock.now();
        if let Some(links) =
            read_json::<Vec<String>>(self.store.as_ref(), SUBSTANCE_LINKS_KEY, now).await
        {
            if !links.is_empty() {
                tracing::debug!(links = links.len(), "Substance link cache hit");
                return links;
            }
        }

        let Some(catalog) = self.ensure_substance_catalog().await else {
            return Vec::new();
        };

        let links = catalog.collect_info_urls();
        if links.is_empty() {
            tracing::warn!("Substance catalog carries no info urls");
        } else {
            write_json(
                self.store.as_ref(),
                SUBSTANCE_LINKS_KEY,
                &links,
                Some(now + catalog_ttl()),
            )
            .await;
        }
        links
    }

    // ── Feed ───────────────────────────────────────────────────────

    /// Run the one-shot initial feed load.
    ///
    /// Returns `false` without side effects if a load is in flight or has
    /// already completed. Otherwise requests batches (sampling `min_size`
    /// reports per substance) until the feed holds `min_size` unique entries
    /// or the retry budget is spent, then publishes the result.
    pub async fn refresh_feed(&self, min_size: usize) -> bool {
        {
            let mut state = self.lock();
            if state.phase != FeedPhase::NotStarted {
                tracing::debug!(phase = ?state.phase, "Initial feed load already started");
                return false;
            }
            state.phase = FeedPhase::Loading;
        }
        let mut guard = PhaseGuard::new(self);

        let links = self.ensure_link_catalog().await;
        let size_per_substance = u32::try_from(min_size).unwrap_or(u32::MAX);

        let mut accumulated = Feed::new();
        for attempt in 1..=self.config.retry_budget {
            if links.is_empty() {
                tracing::warn!("No cached substance links found");
                break;
            }

            let batch = self.fetch_batch(&links, size_per_substance).await;
            let added = accumulated.extend_unique(batch);
            tracing::debug!(attempt, added, total = accumulated.len(), "Feed batch merged");

            if accumulated.len() >= min_size {
                break;
            }
        }

        if accumulated.len() < min_size {
            tracing::info!(
                size = accumulated.len(),
                min_size,
                "Feed below target size after retry budget"
            );
        }

        {
            let mut state = self.lock();
            state.feed = accumulated;
            state.phase = FeedPhase::Loaded;
        }
        guard.disarm();
        true
    }

    /// Fetch one more batch and append its unseen entries to the feed.
    ///
    /// Ignored while any load is in flight. Returns the number of entries
    /// appended.
    pub async fn append_more(&self, batch_size: u32) -> usize {
        {
            let mut state = self.lock();
            if state.phase == FeedPhase::Loading || state.appending {
                tracing::debug!("Feed fetch already in flight");
                return 0;
            }
            state.appending = true;
        }
        let _guard = AppendGuard(self);

        let links = self.ensure_link_catalog().await;
        let batch = if links.is_empty() {
            tracing::warn!("No cached substance links found");
            Vec::new()
        } else {
            self.fetch_batch(&links, batch_size).await
        };

        let added = self.lock().feed.extend_unique(batch);
        tracing::debug!(added, "Appended feed batch");
        added
    }

    /// Append one batch sampled with the configured page size.
    pub async fn append_page(&self) -> usize {
        self.append_more(self.config.page_size).await
    }

    /// Snapshot of the current feed.
    pub fn feed(&self) -> Vec<ExperienceSummary> {
        self.lock().feed.items().to_vec()
    }

    /// Current phase of the initial load.
    pub fn phase(&self) -> FeedPhase {
        self.lock().phase
    }

    /// Whether any feed fetch is in flight.
    pub fn loading(&self) -> bool {
        let state = self.lock();
        state.phase == FeedPhase::Loading || state.appending
    }

    /// Whether the initial load has completed.
    pub fn has_fetched_initial(&self) -> bool {
        self.phase() == FeedPhase::Loaded
    }

    async fn fetch_batch(&self, links: &[String], size_per_substance: u32) -> Vec<ExperienceSummary> {
        match self
            .client
            .random_experiences(links, size_per_substance)
            .await
        {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch experience batch");
                Vec::new()
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Puts the phase back to `NotStarted` if the initial load future is dropped
/// before it publishes.
struct PhaseGuard<'a> {
    manager: &'a FeedCacheManager,
    armed: bool,
}

impl<'a> PhaseGuard<'a> {
    const fn new(manager: &'a FeedCacheManager) -> Self {
        Self {
            manager,
            armed: true,
        }
    }

    const fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.manager.lock().phase = FeedPhase::NotStarted;
        }
    }
}

/// Clears the append flag however `append_more` exits.
struct AppendGuard<'a>(&'a FeedCacheManager);

impl Drop for AppendGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().appending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use crate::services::testing::{FakeErowid, FixedClock, exp, lsd_catalog};
    use chrono::Duration;

    fn manager(client: &Arc<FakeErowid>, store: &Arc<MemoryCacheStore>) -> FeedCacheManager {
        FeedCacheManager::with_clock(
            client.clone(),
            store.clone(),
            Arc::new(FixedClock::default()),
        )
    }

    #[tokio::test]
    async fn test_catalog_fetched_once_then_cached() {
        let client = Arc::new(FakeErowid::new().with_catalog(lsd_catalog()));
        let store = Arc::new(MemoryCacheStore::new());
        let manager = manager(&client, &store);

        for _ in 0..3 {
            assert!(manager.ensure_substance_catalog().await.is_some());
        }
        assert_eq!(client.substance_calls(), 1);
    }

    #[tokio::test]
    async fn test_expired_catalog_is_refetched() {
        let client = Arc::new(FakeErowid::new().with_catalog(lsd_catalog()));
        let store = Arc::new(MemoryCacheStore::new());
        let clock = Arc::new(FixedClock::default());
        let manager = FeedCacheManager::with_clock(client.clone(), store.clone(), clock.clone());

        manager.ensure_substance_catalog().await;
        clock.advance(catalog_ttl() - Duration::seconds(1));
        manager.ensure_substance_catalog().await;
        assert_eq!(client.substance_calls(), 1);

        clock.advance(Duration::seconds(1));
        manager.ensure_substance_catalog().await;
        assert_eq!(client.substance_calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_catalog_fetch_leaves_cache_untouched() {
        let client = Arc::new(FakeErowid::new().failing_substances());
        let store = Arc::new(MemoryCacheStore::new());
        let manager = manager(&client, &store);

        assert!(manager.ensure_substance_catalog().await.is_none());
        assert!(manager.ensure_link_catalog().await.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_link_catalog_derived_and_persisted() {
        let client = Arc::new(FakeErowid::new().with_catalog(lsd_catalog()));
        let store = Arc::new(MemoryCacheStore::new());
        let manager = manager(&client, &store);

        assert_eq!(manager.ensure_link_catalog().await, vec!["https://e.org/lsd"]);
        assert!(store.entry(SUBSTANCE_LINKS_KEY).is_some());

        // Second call is served from the link cache.
        manager.ensure_link_catalog().await;
        assert_eq!(client.substance_calls(), 1);
    }

    #[tokio::test]
    async fn test_refresh_is_one_shot() {
        let client = Arc::new(
            FakeErowid::new()
                .with_catalog(lsd_catalog())
                .with_batch(vec![exp("a", "u1"), exp("b", "u2")]),
        );
        let store = Arc::new(MemoryCacheStore::new());
        let manager = manager(&client, &store);

        assert!(manager.refresh_feed(2).await);
        assert!(!manager.refresh_feed(2).await);
        assert_eq!(client.batch_calls(), 1);
        assert!(manager.has_fetched_initial());
        assert!(!manager.loading());
    }

    #[tokio::test]
    async fn test_refresh_without_links_publishes_empty_feed() {
        let client = Arc::new(FakeErowid::new().failing_substances());
        let store = Arc::new(MemoryCacheStore::new());
        let manager = manager(&client, &store);

        assert!(manager.refresh_feed(10).await);
        assert!(manager.feed().is_empty());
        assert_eq!(client.batch_calls(), 0);
        assert_eq!(manager.phase(), FeedPhase::Loaded);
    }

    #[tokio::test]
    async fn test_batch_errors_degrade_to_empty() {
        let client = Arc::new(
            FakeErowid::new()
                .with_catalog(lsd_catalog())
                .failing_batches(),
        );
        let store = Arc::new(MemoryCacheStore::new());
        let manager = manager(&client, &store).with_config(FeedConfig {
            retry_budget: 3,
            ..FeedConfig::default()
        });

        assert!(manager.refresh_feed(1).await);
        assert!(manager.feed().is_empty());
        assert_eq!(client.batch_calls(), 3);
    }

    #[tokio::test]
    async fn test_append_page_samples_configured_page_size() {
        let client = Arc::new(
            FakeErowid::new()
                .with_catalog(lsd_catalog())
                .with_batch(vec![exp("a", "u1")])
                .with_batch(vec![exp("b", "u2")]),
        );
        let store = Arc::new(MemoryCacheStore::new());
        let manager = manager(&client, &store);

        manager.refresh_feed(1).await;
        assert_eq!(client.last_size_per_substance(), Some(1));

        assert_eq!(manager.append_page().await, 1);
        assert_eq!(client.last_size_per_substance(), Some(5));

        let manager = manager.with_config(FeedConfig {
            page_size: 12,
            ..FeedConfig::default()
        });
        manager.append_page().await;
        assert_eq!(client.last_size_per_substance(), Some(12));
    }

    #[tokio::test]
    async fn test_append_more_dedups_against_existing_feed() {
        let client = Arc::new(
            FakeErowid::new()
                .with_catalog(lsd_catalog())
                .with_batch(vec![exp("a", "u1"), exp("b", "u2")])
                .with_batch(vec![exp("b-dup", "u2"), exp("c", "u3"), exp("c-dup", "u3")]),
        );
        let store = Arc::new(MemoryCacheStore::new());
        let manager = manager(&client, &store);

        manager.refresh_feed(2).await;
        assert_eq!(manager.append_more(5).await, 1);

        let urls: Vec<String> = manager.feed().into_iter().map(|e| e.url).collect();
        assert_eq!(urls, vec!["u1", "u2", "u3"]);
        assert_eq!(client.last_size_per_substance(), Some(5));
    }
}
