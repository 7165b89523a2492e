//! Substance catalog types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single substance as listed in the Erowid psychoactives index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substance {
    /// Display name (e.g. `"LSD"`).
    pub name: String,
    /// Erowid vault page for the substance, if the index links one.
    #[serde(default)]
    pub info_url: Option<String>,
    /// Category label the substance was listed under.
    #[serde(default)]
    pub category: String,
}

impl Substance {
    /// Create a substance entry.
    pub fn new(
        name: impl Into<String>,
        info_url: Option<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            info_url,
            category: category.into(),
        }
    }

    /// Whether `name` refers to this substance.
    ///
    /// Matching ignores case and collapses internal whitespace, so
    /// `" 2C-B "` and `"2c-b"` are the same substance.
    pub fn matches_name(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }
}

/// Canonical form used when cross-referencing substance names.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Substances grouped by category, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstanceCatalog {
    categories: IndexMap<String, Vec<Substance>>,
}

impl SubstanceCatalog {
    /// Build a catalog from an ordered category map.
    pub const fn new(categories: IndexMap<String, Vec<Substance>>) -> Self {
        Self { categories }
    }

    /// Iterate over `(category, substances)` pairs in server order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[Substance])> {
        self.categories
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// Substances listed under one category key.
    pub fn category(&self, key: &str) -> Option<&[Substance]> {
        self.categories.get(key).map(Vec::as_slice)
    }

    /// Find a substance by name across all categories.
    pub fn find(&self, name: &str) -> Option<&Substance> {
        self.categories
            .values()
            .flatten()
            .find(|substance| substance.matches_name(name))
    }

    /// Total number of substances across categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Whether the catalog lists no substances at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten every non-empty `info_url` in category order.
    pub fn collect_info_urls(&self) -> Vec<String> {
        self.categories
            .values()
            .flatten()
            .filter_map(|substance| substance.info_url.as_deref())
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect()
    }
}
