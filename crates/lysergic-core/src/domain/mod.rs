//! Domain types for substances, experience reports and feeds.
//!
//! These types are shared by every adapter. They carry serde derives because
//! the same shapes are used on the wire and in the persistent cache.

mod experience;
mod feed;
mod substance;

pub use experience::{
    CategoryPage, Dose, ExperienceCategory, ExperienceDetail, ExperienceMetadata,
    ExperienceSummary, Pagination, SubstanceCategories, SubstanceInformation,
};
pub use feed::Feed;
pub use substance::{Substance, SubstanceCatalog, normalize_name};
