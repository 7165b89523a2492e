//! The readable form of an experience report.

use lysergic_core::ExperienceDetail;

use crate::text_utils;

/// Separator placed between the spoken sections of a document.
const SECTION_SEPARATOR: &str = ". ";

/// A report reduced to the parts that are read aloud.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeechDocument {
    pub title: String,
    pub author: Option<String>,
    pub substances: Vec<String>,
    /// Report body, still carrying its HTML markup.
    pub body: String,
}

impl SpeechDocument {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_substances<I, S>(mut self, substances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.substances = substances.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_experience(detail: &ExperienceDetail) -> Self {
        Self {
            title: detail.title.clone(),
            author: detail.author.clone(),
            substances: detail.substance_names(),
            body: detail.content.clone(),
        }
    }

    /// The full text stream that gets chunked for playback.
    ///
    /// Title, `by {author}`, `Substances: a, b` and the stripped body,
    /// joined with `". "`. Empty parts are skipped.
    pub fn to_stream(&self) -> String {
        let title = self.title.trim().to_string();
        let author = self
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(|a| format!("by {a}"))
            .unwrap_or_default();
        let substances = if self.substances.is_empty() {
            String::new()
        } else {
            format!("Substances: {}", self.substances.join(", "))
        };
        let body = text_utils::strip_markup(&self.body);

        [title, author, substances, body]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR)
    }
}

impl From<&ExperienceDetail> for SpeechDocument {
    fn from(detail: &ExperienceDetail) -> Self {
        Self::from_experience(detail)
    }
}
