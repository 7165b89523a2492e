//! Story of the day - one random report, cached until the next local midnight.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};

use crate::cache::{STORY_OF_THE_DAY_KEY, SUBSTANCE_LINKS_KEY, read_json, write_json};
use crate::domain::ExperienceDetail;
use crate::ports::{CacheStore, Clock, ErowidClientPort, SystemClock};

/// Reports sampled per substance when drawing the story.
const STORY_SAMPLE_SIZE: u32 = 1;

pub struct StoryOfTheDayService {
    client: Arc<dyn ErowidClientPort>,
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
}

impl StoryOfTheDayService {
    pub fn new(client: Arc<dyn ErowidClientPort>, store: Arc<dyn CacheStore>) -> Self {
        Self::with_clock(client, store, Arc::new(SystemClock))
    }

    pub fn with_clock(
        client: Arc<dyn ErowidClientPort>,
        store: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            store,
            clock,
        }
    }

    /// Today's story, drawing a new one once the cached story has expired.
    ///
    /// Samples from the cached substance link list, so a cold link cache
    /// yields `None`.
    pub async fn story_of_the_day(&self) -> Option<ExperienceDetail> {
        let now = self.clock.now();
        if let Some(story) =
            read_json::<ExperienceDetail>(self.store.as_ref(), STORY_OF_THE_DAY_KEY, now).await
        {
            tracing::debug!(url = %story.url, "Story of the day cache hit");
            return Some(story);
        }

        let links: Vec<String> = read_json(self.store.as_ref(), SUBSTANCE_LINKS_KEY, now)
            .await
            .unwrap_or_default();
        if links.is_empty() {
            tracing::warn!("No cached substance links found");
            return None;
        }

        match self.client.random_experience(&links, STORY_SAMPLE_SIZE).await {
            Ok(Some(story)) => {
                let expires_at = next_midnight(now, &Local);
                write_json(
                    self.store.as_ref(),
                    STORY_OF_THE_DAY_KEY,
                    &story,
                    Some(expires_at),
                )
                .await;
                tracing::info!(url = %story.url, %expires_at, "Story of the day cached");
                Some(story)
            }
            Ok(None) => {
                tracing::warn!("Server returned no story of the day");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch story of the day");
                None
            }
        }
    }
}

/// The first midnight in `tz` strictly after `now`.
pub fn next_midnight<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let tomorrow = now.with_timezone(tz).date_naive().succ_opt();
    tomorrow
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .and_then(|midnight| tz.from_local_datetime(&midnight).earliest())
        .map_or_else(|| now + Duration::days(1), |dt| dt.with_timezone(&Utc))
}
