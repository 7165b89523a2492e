//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - The cache store is a dumb key-value port; expiry policy lives in services
//! - Time is injected through [`Clock`] so expiry is testable

pub mod cache_store;
pub mod clock;
pub mod erowid;

pub use cache_store::{CacheEntry, CacheStore, CacheStoreError};
pub use clock::{Clock, SystemClock};
pub use erowid::{ErowidClientPort, ErowidPortError, ErowidPortResult};
