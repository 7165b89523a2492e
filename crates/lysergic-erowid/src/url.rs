//! URL construction helpers for the crawler API.
//!
//! Every route hangs off the configured base URL, which may carry a path
//! prefix such as `/api/v1`.

use crate::models::ErowidConfig;
use url::Url;

/// Append `route` to the base URL's path.
fn endpoint(config: &ErowidConfig, route: &str) -> Url {
    let mut url = config.base_url.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/{}", route.trim_start_matches('/')));
    url.set_query(None);
    url
}

pub fn build_substances_url(config: &ErowidConfig) -> Url {
    endpoint(config, "erowid/substances")
}

pub fn build_random_experiences_url(config: &ErowidConfig, size_per_substance: u32) -> Url {
    let mut url = endpoint(config, "erowid/random/experiences");
    url.set_query(Some(&format!("size_per_substance={size_per_substance}")));
    url
}

pub fn build_random_experience_url(config: &ErowidConfig, size_per_substance: u32) -> Url {
    let mut url = endpoint(config, "erowid/random/experience");
    url.set_query(Some(&format!("size_per_substance={size_per_substance}")));
    url
}

pub fn build_experience_url(config: &ErowidConfig) -> Url {
    endpoint(config, "erowid/experience")
}

pub fn build_category_experiences_url(config: &ErowidConfig, start: u32, max: u32) -> Url {
    let mut url = endpoint(config, "erowid/category/experiences");
    url.set_query(Some(&format!("start={start}&max={max}")));
    url
}

pub fn build_substance_categories_url(config: &ErowidConfig) -> Url {
    endpoint(config, "erowid/experiences/categories")
}

pub fn build_information_url(config: &ErowidConfig) -> Url {
    endpoint(config, "erowid/information")
}
