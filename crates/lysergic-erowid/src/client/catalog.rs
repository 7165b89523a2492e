//! Substance catalog and reference lookups.

use lysergic_core::{SubstanceCatalog, SubstanceCategories, SubstanceInformation};

use super::ErowidClient;
use crate::error::ErowidResult;
use crate::http::HttpBackend;
use crate::models::{SubstancesResponse, UrlBody};
use crate::url::{build_information_url, build_substance_categories_url, build_substances_url};

impl<B: HttpBackend> ErowidClient<B> {
    /// Fetch the substance index, grouped by category.
    pub async fn fetch_substances(&self) -> ErowidResult<SubstanceCatalog> {
        let url = build_substances_url(&self.config);
        let response: SubstancesResponse = self.backend.get_json(&url).await?;
        tracing::debug!(
            status = response.status.as_deref().unwrap_or("unknown"),
            total = response.total_substances,
            "Fetched substance index"
        );
        Ok(response.data)
    }

    /// List the report categories for one substance page.
    pub async fn fetch_substance_categories(
        &self,
        substance_url: &str,
    ) -> ErowidResult<SubstanceCategories> {
        let url = build_substance_categories_url(&self.config);
        self.backend
            .post_json(&url, &UrlBody { url: substance_url })
            .await
    }

    /// Fetch the scraped reference document for a vault page.
    pub async fn fetch_information(&self, page_url: &str) -> ErowidResult<SubstanceInformation> {
        let url = build_information_url(&self.config);
        self.backend.post_json(&url, &UrlBody { url: page_url }).await
    }
}
