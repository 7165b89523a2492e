//! Internal configuration and wire envelopes for the crawler API.
//!
//! Envelopes are unwrapped into core domain types before they leave the
//! crate.

use std::time::Duration;

use lysergic_core::{CategoryPage, ExperienceDetail, ExperienceSummary, SubstanceCatalog};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::DEFAULT_BASE_URL;

// ============================================================================
// Configuration (used internally, see config.rs for public config)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ErowidConfig {
    pub base_url: Url,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_retries: u8,
    pub retry_base_delay_ms: u64,
}

#[cfg(test)]
impl Default for ErowidConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            user_agent: "lysergic-test".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay_ms: 500,
        }
    }
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UrlBody<'a> {
    pub url: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UrlsBody<'a> {
    pub urls: &'a [String],
}

// ============================================================================
// Response envelopes
// ============================================================================

/// `GET /erowid/substances`
#[derive(Debug, Deserialize)]
pub struct SubstancesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: SubstanceCatalog,
    #[serde(default)]
    pub total_substances: Option<u64>,
}

/// `POST /erowid/random/experiences`
///
/// Older servers answer with a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RandomExperiencesResponse {
    Page(CategoryPage),
    Bare(Vec<ExperienceSummary>),
}

impl RandomExperiencesResponse {
    pub fn into_experiences(self) -> Vec<ExperienceSummary> {
        match self {
            Self::Page(page) => page.experiences,
            Self::Bare(items) => items,
        }
    }
}

/// `POST /erowid/random/experience`
#[derive(Debug, Deserialize)]
pub struct RandomExperienceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub experience: Option<ExperienceDetail>,
}

impl RandomExperienceResponse {
    pub fn into_experience(self) -> Option<ExperienceDetail> {
        if self.success { self.experience } else { None }
    }
}

/// Error body returned by the server on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Render `detail` as text whether the server sent a string or a
    /// validation-error list.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
