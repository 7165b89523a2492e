//! Erowid API client port trait.

use async_trait::async_trait;

use super::error::ErowidPortResult;
use crate::domain::{
    CategoryPage, ExperienceDetail, ExperienceSummary, SubstanceCatalog, SubstanceCategories,
    SubstanceInformation,
};

/// Port trait for the remote Erowid crawler API.
///
/// The implementation lives in `lysergic-erowid`.
///
/// # Design
///
/// - Uses core-owned domain types, not wire envelopes
/// - Returns `ErowidPortError` for all failures
/// - No retry or caching policy; services decide how to degrade
#[async_trait]
pub trait ErowidClientPort: Send + Sync {
    /// Fetch the full substance catalog, grouped by category.
    async fn substances(&self) -> ErowidPortResult<SubstanceCatalog>;

    /// Sample random experience summaries from the given substance pages.
    ///
    /// # Arguments
    ///
    /// * `urls` - Substance `info_url`s to sample from
    /// * `size_per_substance` - How many reports to draw per substance
    async fn random_experiences(
        &self,
        urls: &[String],
        size_per_substance: u32,
    ) -> ErowidPortResult<Vec<ExperienceSummary>>;

    /// Draw a single random full experience report.
    ///
    /// Returns `None` when the server reports no success.
    async fn random_experience(
        &self,
        urls: &[String],
        size_per_substance: u32,
    ) -> ErowidPortResult<Option<ExperienceDetail>>;

    /// Fetch one full experience report.
    async fn experience(&self, url: &str) -> ErowidPortResult<ExperienceDetail>;

    /// Fetch one page of a category listing.
    async fn category_experiences(
        &self,
        category_url: &str,
        start: u32,
        max: u32,
    ) -> ErowidPortResult<CategoryPage>;

    /// List the report categories available for a substance.
    async fn substance_categories(&self, substance_url: &str)
    -> ErowidPortResult<SubstanceCategories>;

    /// Fetch the reference document for a substance vault page.
    async fn information(&self, url: &str) -> ErowidPortResult<SubstanceInformation>;
}
