//! Core services - orchestration between ports and domain logic.
//!
//! Services here don't know about concrete adapters; they receive
//! `Arc<dyn Port>` handles at construction.

mod app_core;
mod bookmarks;
mod explore;
mod feed;
mod story;

#[cfg(test)]
pub(crate) mod testing;

pub use app_core::LysergicCore;
pub use bookmarks::BookmarkService;
pub use explore::ExploreService;
pub use feed::{FEED_RETRY_BUDGET, FeedCacheManager, FeedConfig, FeedPhase};
pub use story::{StoryOfTheDayService, next_midnight};
