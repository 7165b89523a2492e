//! Random sampling and category pagination.

use lysergic_core::{CategoryPage, ExperienceDetail, ExperienceSummary};

use super::ErowidClient;
use crate::error::ErowidResult;
use crate::http::HttpBackend;
use crate::models::{RandomExperienceResponse, RandomExperiencesResponse, UrlBody, UrlsBody};
use crate::url::{
    build_category_experiences_url, build_random_experience_url, build_random_experiences_url,
};

impl<B: HttpBackend> ErowidClient<B> {
    /// Sample experience summaries from the given substance pages.
    pub async fn fetch_random_experiences(
        &self,
        urls: &[String],
        size_per_substance: u32,
    ) -> ErowidResult<Vec<ExperienceSummary>> {
        let url = build_random_experiences_url(&self.config, size_per_substance);
        let response: RandomExperiencesResponse =
            self.backend.post_json(&url, &UrlsBody { urls }).await?;
        let experiences = response.into_experiences();
        tracing::debug!(
            substances = urls.len(),
            size_per_substance,
            received = experiences.len(),
            "Fetched random experiences"
        );
        Ok(experiences)
    }

    /// Draw one full random report.
    pub async fn fetch_random_experience(
        &self,
        urls: &[String],
        size_per_substance: u32,
    ) -> ErowidResult<Option<ExperienceDetail>> {
        let url = build_random_experience_url(&self.config, size_per_substance);
        let response: RandomExperienceResponse =
            self.backend.post_json(&url, &UrlsBody { urls }).await?;
        Ok(response.into_experience())
    }

    /// Fetch one page of a category listing.
    pub async fn fetch_category_experiences(
        &self,
        category_url: &str,
        start: u32,
        max: u32,
    ) -> ErowidResult<CategoryPage> {
        let url = build_category_experiences_url(&self.config, start, max);
        self.backend
            .post_json(&url, &UrlBody { url: category_url })
            .await
    }
}
