//! Bookmark list persisted in the cache store without expiry.

use std::sync::Arc;

use crate::cache::{BOOKMARKS_KEY, read_json, write_json};
use crate::domain::ExperienceSummary;
use crate::ports::{CacheStore, Clock, SystemClock};

/// Reads and edits the saved bookmark list.
///
/// Bookmarks are keyed by `url`. A missing or corrupt stored list reads
/// as empty.
pub struct BookmarkService {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
}

impl BookmarkService {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
        }
    }

    /// All bookmarks in the order they were first saved.
    pub async fn list(&self) -> Vec<ExperienceSummary> {
        read_json(self.store.as_ref(), BOOKMARKS_KEY, self.clock.now())
            .await
            .unwrap_or_default()
    }

    pub async fn is_bookmarked(&self, url: &str) -> bool {
        self.list().await.iter().any(|b| b.url == url)
    }

    /// Save a bookmark, replacing an existing one with the same url in place.
    pub async fn save(&self, summary: ExperienceSummary) -> bool {
        let mut bookmarks = self.list().await;
        match bookmarks.iter_mut().find(|b| b.url == summary.url) {
            Some(existing) => *existing = summary,
            None => bookmarks.push(summary),
        }
        self.persist(&bookmarks).await
    }

    /// Remove the bookmark with `url`. Returns whether one was removed.
    pub async fn remove(&self, url: &str) -> bool {
        let mut bookmarks = self.list().await;
        let before = bookmarks.len();
        bookmarks.retain(|b| b.url != url);
        if bookmarks.len() == before {
            return false;
        }
        self.persist(&bookmarks).await
    }

    /// Add the bookmark if absent, remove it if present.
    ///
    /// Returns whether the report is bookmarked afterwards.
    pub async fn toggle(&self, summary: ExperienceSummary) -> bool {
        if self.is_bookmarked(&summary.url).await {
            !self.remove(&summary.url).await
        } else {
            self.save(summary).await
        }
    }

    async fn persist(&self, bookmarks: &[ExperienceSummary]) -> bool {
        let saved = write_json(self.store.as_ref(), BOOKMARKS_KEY, bookmarks, None).await;
        if saved {
            tracing::debug!(count = bookmarks.len(), "Bookmarks saved");
        }
        saved
    }
}
