//! Full experience report lookup.

use lysergic_core::ExperienceDetail;

use super::ErowidClient;
use crate::error::{ErowidError, ErowidResult};
use crate::http::HttpBackend;
use crate::models::UrlBody;
use crate::url::build_experience_url;

impl<B: HttpBackend> ErowidClient<B> {
    /// Fetch one full report by its Erowid URL.
    pub async fn fetch_experience(&self, report_url: &str) -> ErowidResult<ExperienceDetail> {
        let url = build_experience_url(&self.config);
        let detail: ExperienceDetail = self
            .backend
            .post_json(&url, &UrlBody { url: report_url })
            .await?;

        if detail.title.trim().is_empty() && detail.content.trim().is_empty() {
            return Err(ErowidError::InvalidResponse {
                message: format!("Empty report returned for {report_url}"),
            });
        }
        Ok(detail)
    }
}
