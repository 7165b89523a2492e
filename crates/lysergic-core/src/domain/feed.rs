//! Feed accumulation with url-based de-duplication.

use std::collections::HashSet;

use super::experience::ExperienceSummary;

/// An ordered, url-unique list of experience summaries.
///
/// Entries are only ever appended; the first occurrence of a url wins and
/// later duplicates are dropped.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    items: Vec<ExperienceSummary>,
    seen: HashSet<String>,
}

impl Feed {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every entry of `batch` whose url has not been seen yet.
    ///
    /// Returns the number of entries appended.
    pub fn extend_unique<I>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = ExperienceSummary>,
    {
        let before = self.items.len();
        for item in batch {
            if self.seen.insert(item.url.clone()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    /// Whether a url is already present.
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ExperienceSummary] {
        &self.items
    }
}
