//! Hand-written fakes shared by service unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use indexmap::IndexMap;

use crate::domain::{
    CategoryPage, ExperienceDetail, ExperienceSummary, Substance, SubstanceCatalog,
    SubstanceCategories, SubstanceInformation,
};
use crate::ports::{Clock, ErowidClientPort, ErowidPortError, ErowidPortResult};

pub fn exp(title: &str, url: &str) -> ExperienceSummary {
    ExperienceSummary::new(title, url)
}

pub fn detail(title: &str, url: &str) -> ExperienceDetail {
    ExperienceDetail {
        title: title.to_string(),
        url: url.to_string(),
        author: Some("anon".to_string()),
        substances: Some("LSD".to_string()),
        content: "It began.".to_string(),
        metadata: crate::domain::ExperienceMetadata::default(),
        doses: Vec::new(),
    }
}

pub fn lsd_catalog() -> SubstanceCatalog {
    let mut categories = IndexMap::new();
    categories.insert(
        "Psychedelics".to_string(),
        vec![
            Substance::new("LSD", Some("https://e.org/lsd".to_string()), "Psychedelics"),
            Substance::new("Unknown", None, "Psychedelics"),
        ],
    );
    SubstanceCatalog::new(categories)
}

/// Clock frozen at a settable instant.
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Scripted `ErowidClientPort` that counts calls.
///
/// Queued batches are served in order; once one batch is left it is
/// served for every later call.
#[derive(Default)]
pub struct FakeErowid {
    catalog: Option<SubstanceCatalog>,
    batches: Mutex<VecDeque<Vec<ExperienceSummary>>>,
    fail_batches: bool,
    story: Option<ExperienceDetail>,
    substance_calls: AtomicUsize,
    batch_calls: AtomicUsize,
    story_calls: AtomicUsize,
    last_size: Mutex<Option<u32>>,
}

impl FakeErowid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: SubstanceCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn failing_substances(mut self) -> Self {
        self.catalog = None;
        self
    }

    pub fn with_batch(self, batch: Vec<ExperienceSummary>) -> Self {
        self.batches.lock().unwrap().push_back(batch);
        self
    }

    pub fn failing_batches(mut self) -> Self {
        self.fail_batches = true;
        self
    }

    pub fn with_story(mut self, story: ExperienceDetail) -> Self {
        self.story = Some(story);
        self
    }

    pub fn substance_calls(&self) -> usize {
        self.substance_calls.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn story_calls(&self) -> usize {
        self.story_calls.load(Ordering::SeqCst)
    }

    pub fn last_size_per_substance(&self) -> Option<u32> {
        *self.last_size.lock().unwrap()
    }

    fn network_error() -> ErowidPortError {
        ErowidPortError::Network {
            message: "connection refused".to_string(),
        }
    }
}

#[async_trait]
impl ErowidClientPort for FakeErowid {
    async fn substances(&self) -> ErowidPortResult<SubstanceCatalog> {
        self.substance_calls.fetch_add(1, Ordering::SeqCst);
        self.catalog.clone().ok_or_else(Self::network_error)
    }

    async fn random_experiences(
        &self,
        _urls: &[String],
        size_per_substance: u32,
    ) -> ErowidPortResult<Vec<ExperienceSummary>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_size.lock().unwrap() = Some(size_per_substance);
        if self.fail_batches {
            return Err(Self::network_error());
        }

        let mut batches = self.batches.lock().unwrap();
        let batch = if batches.len() > 1 {
            batches.pop_front()
        } else {
            batches.front().cloned()
        };
        Ok(batch.unwrap_or_default())
    }

    async fn random_experience(
        &self,
        _urls: &[String],
        _size_per_substance: u32,
    ) -> ErowidPortResult<Option<ExperienceDetail>> {
        self.story_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.story.clone())
    }

    async fn experience(&self, url: &str) -> ErowidPortResult<ExperienceDetail> {
        Err(ErowidPortError::NotFound {
            url: url.to_string(),
        })
    }

    async fn category_experiences(
        &self,
        _category_url: &str,
        _start: u32,
        _max: u32,
    ) -> ErowidPortResult<CategoryPage> {
        Ok(CategoryPage::default())
    }

    async fn substance_categories(
        &self,
        _substance_url: &str,
    ) -> ErowidPortResult<SubstanceCategories> {
        Ok(SubstanceCategories::default())
    }

    async fn information(&self, _url: &str) -> ErowidPortResult<SubstanceInformation> {
        Ok(SubstanceInformation::default())
    }
}
