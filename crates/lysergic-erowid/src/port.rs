//! Port trait implementation for `ErowidClient`.
//!
//! Implements the core-owned `ErowidClientPort` and maps internal errors to
//! port errors.

use async_trait::async_trait;
use lysergic_core::{
    CategoryPage, ErowidClientPort, ErowidPortError, ErowidPortResult, ExperienceDetail,
    ExperienceSummary, SubstanceCatalog, SubstanceCategories, SubstanceInformation,
};

use crate::client::ErowidClient;
use crate::error::ErowidError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

fn map_error(err: ErowidError) -> ErowidPortError {
    match err {
        ErowidError::ApiRequestFailed {
            status,
            url,
            detail,
        } => match status {
            404 => ErowidPortError::NotFound { url },
            429 => ErowidPortError::RateLimited,
            _ => ErowidPortError::Server {
                status,
                message: detail.unwrap_or(url),
            },
        },
        ErowidError::InvalidResponse { message } => ErowidPortError::InvalidResponse { message },
        ErowidError::Network(e) if e.is_decode() => ErowidPortError::InvalidResponse {
            message: e.to_string(),
        },
        ErowidError::Network(e) => ErowidPortError::Network {
            message: e.to_string(),
        },
        ErowidError::InvalidUrl(e) => ErowidPortError::Configuration {
            message: e.to_string(),
        },
        ErowidError::JsonParse(e) => ErowidPortError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> ErowidClientPort for ErowidClient<B> {
    async fn substances(&self) -> ErowidPortResult<SubstanceCatalog> {
        self.fetch_substances().await.map_err(map_error)
    }

    async fn random_experiences(
        &self,
        urls: &[String],
        size_per_substance: u32,
    ) -> ErowidPortResult<Vec<ExperienceSummary>> {
        self.fetch_random_experiences(urls, size_per_substance)
            .await
            .map_err(map_error)
    }

    async fn random_experience(
        &self,
        urls: &[String],
        size_per_substance: u32,
    ) -> ErowidPortResult<Option<ExperienceDetail>> {
        self.fetch_random_experience(urls, size_per_substance)
            .await
            .map_err(map_error)
    }

    async fn experience(&self, url: &str) -> ErowidPortResult<ExperienceDetail> {
        self.fetch_experience(url).await.map_err(map_error)
    }

    async fn category_experiences(
        &self,
        category_url: &str,
        start: u32,
        max: u32,
    ) -> ErowidPortResult<CategoryPage> {
        self.fetch_category_experiences(category_url, start, max)
            .await
            .map_err(map_error)
    }

    async fn substance_categories(
        &self,
        substance_url: &str,
    ) -> ErowidPortResult<SubstanceCategories> {
        self.fetch_substance_categories(substance_url)
            .await
            .map_err(map_error)
    }

    async fn information(&self, url: &str) -> ErowidPortResult<SubstanceInformation> {
        self.fetch_information(url).await.map_err(map_error)
    }
}
