//! Experience report types shared by the feed, bookmarks and detail views.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Summary of one experience report as shown in feeds and bookmark lists.
///
/// `url` is the identity key: two summaries with the same url are the same
/// report regardless of their other fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceSummary {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub substance: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rating: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl ExperienceSummary {
    /// Create a summary with only the required fields set.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            author: None,
            substance: None,
            rating: None,
            date: None,
        }
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_substance(mut self, substance: impl Into<String>) -> Self {
        self.substance = Some(substance.into());
        self
    }
}

/// Report metadata block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceMetadata {
    #[serde(default, deserialize_with = "lenient_string")]
    pub published: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub views: Option<String>,
}

/// One row of the dose chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dose {
    #[serde(default)]
    pub substance: Option<String>,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

impl Dose {
    /// Render as `"LSD blotter via oral – 100 ug"`, skipping missing parts.
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(substance) = non_empty(self.substance.as_deref()) {
            parts.push(substance.to_string());
        }
        if let Some(form) = non_empty(self.form.as_deref()) {
            parts.push(form.to_string());
        }
        if let Some(method) = non_empty(self.method.as_deref()) {
            parts.push(format!("via {method}"));
        }
        if let Some(amount) = non_empty(self.amount.as_deref()) {
            parts.push(format!("– {amount}"));
        }
        parts.join(" ")
    }
}

/// A fully loaded experience report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceDetail {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub author: Option<String>,
    /// Comma-separated substance names as published on the report.
    #[serde(default, alias = "substance")]
    pub substances: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: ExperienceMetadata,
    #[serde(default)]
    pub doses: Vec<Dose>,
}

impl ExperienceDetail {
    /// Individual substance names, split on commas and ampersands.
    pub fn substance_names(&self) -> Vec<String> {
        self.substances
            .as_deref()
            .unwrap_or_default()
            .split([',', '&'])
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The summary stored when this report is bookmarked.
    pub fn to_summary(&self) -> ExperienceSummary {
        ExperienceSummary {
            title: self.title.clone(),
            url: self.url.clone(),
            author: self.author.clone(),
            substance: self.substances.clone(),
            rating: None,
            date: self.metadata.published.clone(),
        }
    }
}

/// Pagination flag returned alongside experience lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub has_next: bool,
}

/// One page of experiences for an Erowid category listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPage {
    #[serde(default)]
    pub experiences: Vec<ExperienceSummary>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// A report category for one substance (e.g. "First Times").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceCategory {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub experience_count: u64,
}

/// Report categories available for one substance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstanceCategories {
    #[serde(default)]
    pub has_experiences: bool,
    #[serde(default)]
    pub categories: IndexMap<String, ExperienceCategory>,
}

/// Reference document scraped from a substance vault page.
///
/// The server returns a loosely structured document; everything beyond the
/// envelope is kept as raw sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubstanceInformation {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(flatten)]
    pub sections: serde_json::Map<String, serde_json::Value>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Accept strings, numbers and nulls for loosely typed scraped fields.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_accepts_nulls_and_numeric_rating() {
        let summary: ExperienceSummary = serde_json::from_value(json!({
            "title": "A Gentle Opening",
            "url": "https://www.erowid.org/experiences/exp.php?ID=1",
            "author": null,
            "substance": "LSD",
            "rating": 4,
        }))
        .unwrap();
        assert_eq!(summary.author, None);
        assert_eq!(summary.rating.as_deref(), Some("4"));
        assert_eq!(summary.date, None);
    }

    #[test]
    fn test_detail_substance_names() {
        let detail: ExperienceDetail = serde_json::from_value(json!({
            "title": "Mixed",
            "url": "https://www.erowid.org/experiences/exp.php?ID=2",
            "substances": "Cannabis, LSD & MDMA",
            "content": "Body",
            "metadata": {"published": "Jan 1, 2020", "views": 1234},
        }))
        .unwrap();
        assert_eq!(detail.substance_names(), vec!["Cannabis", "LSD", "MDMA"]);
        assert_eq!(detail.metadata.views.as_deref(), Some("1234"));
        assert_eq!(detail.to_summary().date.as_deref(), Some("Jan 1, 2020"));
    }

    #[test]
    fn test_dose_describe_skips_missing_parts() {
        let dose = Dose {
            substance: Some("LSD".into()),
            form: Some("blotter".into()),
            method: Some("oral".into()),
            amount: None,
        };
        assert_eq!(dose.describe(), "LSD blotter via oral");

        let bare = Dose {
            amount: Some("1 hit".into()),
            ..Dose::default()
        };
        assert_eq!(bare.describe(), "– 1 hit");
    }

    #[test]
    fn test_information_keeps_unknown_sections() {
        let info: SubstanceInformation = serde_json::from_value(json!({
            "success": true,
            "domain": "erowid.org",
            "title": "LSD Vault",
            "effects": ["visuals"],
        }))
        .unwrap();
        assert!(info.success);
        assert_eq!(info.sections["title"], "LSD Vault");
    }
}
