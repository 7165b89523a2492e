//! Pass-through browsing operations on the remote API.

use std::sync::Arc;

use crate::domain::{CategoryPage, ExperienceDetail, SubstanceCategories, SubstanceInformation};
use crate::ports::{ErowidClientPort, ErowidPortResult};

/// Detail, category and reference lookups.
///
/// Unlike the feed these are not cached and errors are returned to the
/// caller so a view can show them.
pub struct ExploreService {
    client: Arc<dyn ErowidClientPort>,
}

impl ExploreService {
    pub fn new(client: Arc<dyn ErowidClientPort>) -> Self {
        Self { client }
    }

    pub async fn experience(&self, url: &str) -> ErowidPortResult<ExperienceDetail> {
        tracing::debug!(url, "Fetching experience");
        self.client.experience(url).await
    }

    pub async fn category_experiences(
        &self,
        category_url: &str,
        start: u32,
        max: u32,
    ) -> ErowidPortResult<CategoryPage> {
        tracing::debug!(category_url, start, max, "Fetching category page");
        self.client
            .category_experiences(category_url, start, max)
            .await
    }

    pub async fn substance_categories(
        &self,
        substance_url: &str,
    ) -> ErowidPortResult<SubstanceCategories> {
        tracing::debug!(substance_url, "Fetching substance categories");
        self.client.substance_categories(substance_url).await
    }

    pub async fn information(&self, url: &str) -> ErowidPortResult<SubstanceInformation> {
        tracing::debug!(url, "Fetching substance information");
        self.client.information(url).await
    }
}
