#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod cache;
pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use cache::MemoryCacheStore;
pub use domain::{
    CategoryPage, Dose, ExperienceCategory, ExperienceDetail, ExperienceMetadata,
    ExperienceSummary, Feed, Pagination, Substance, SubstanceCatalog, SubstanceCategories,
    SubstanceInformation,
};
pub use paths::{PathError, data_root, database_path, database_path_in};
pub use ports::{
    CacheEntry, CacheStore, CacheStoreError, Clock, ErowidClientPort, ErowidPortError,
    ErowidPortResult, SystemClock,
};
pub use services::{
    BookmarkService, ExploreService, FEED_RETRY_BUDGET, FeedCacheManager, FeedConfig, FeedPhase,
    LysergicCore, StoryOfTheDayService,
};
pub use utils::{UrlValidationError, validate_experience_url};
