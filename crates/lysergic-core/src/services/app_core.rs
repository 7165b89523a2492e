//! `LysergicCore` - the application facade handed to front ends.

use std::sync::Arc;

use crate::ports::{CacheStore, Clock, ErowidClientPort, SystemClock};

use super::{BookmarkService, ExploreService, FeedCacheManager, FeedConfig, StoryOfTheDayService};

/// Bundles the core services around one client and one cache store.
///
/// # Example
///
/// ```ignore
/// let core = LysergicCore::new(client, store);
/// core.feed().refresh_feed(core.feed().config().initial_size).await;
/// for item in core.feed().feed() { println!("{}", item.title); }
/// ```
pub struct LysergicCore {
    feed: FeedCacheManager,
    bookmarks: BookmarkService,
    story: StoryOfTheDayService,
    explore: ExploreService,
}

impl LysergicCore {
    pub fn new(client: Arc<dyn ErowidClientPort>, store: Arc<dyn CacheStore>) -> Self {
        Self::with_clock(client, store, Arc::new(SystemClock))
    }

    pub fn with_clock(
        client: Arc<dyn ErowidClientPort>,
        store: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            feed: FeedCacheManager::with_clock(client.clone(), store.clone(), clock.clone()),
            bookmarks: BookmarkService::new(store.clone()),
            story: StoryOfTheDayService::with_clock(client.clone(), store, clock),
            explore: ExploreService::new(client),
        }
    }

    /// Apply feed sizing configuration.
    #[must_use]
    pub fn with_feed_config(mut self, config: FeedConfig) -> Self {
        self.feed = self.feed.with_config(config);
        self
    }

    pub const fn feed(&self) -> &FeedCacheManager {
        &self.feed
    }

    pub const fn bookmarks(&self) -> &BookmarkService {
        &self.bookmarks
    }

    pub const fn story(&self) -> &StoryOfTheDayService {
        &self.story
    }

    pub const fn explore(&self) -> &ExploreService {
        &self.explore
    }
}
