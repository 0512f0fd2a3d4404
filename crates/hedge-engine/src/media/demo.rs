//! Demo Media Source
//!
//! Serves a demo ad's posts. Lookups for selected ids can be made to fail.

use std::collections::HashSet;

use async_trait::async_trait;

use super::MediaSource;
use crate::demo::{self, DemoAd};
use crate::error::{HedgeError, Result};
use crate::model::MediaRecord;

pub struct DemoMediaSource {
    ad: DemoAd,
    failing: HashSet<String>,
}

impl DemoMediaSource {
    pub fn new(ad: DemoAd) -> Self {
        Self {
            ad,
            failing: HashSet::new(),
        }
    }

    /// Source for a demo ad by id
    pub fn for_ad(id: &str) -> Result<Self> {
        demo::find_ad(id).map(Self::new)
    }

    /// Make engagement lookups fail for these media ids (for testing)
    pub fn with_failures<I, S>(mut self, media_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failing.extend(media_ids.into_iter().map(Into::into));
        self
    }

    pub fn ad(&self) -> &DemoAd {
        &self.ad
    }
}

#[async_trait]
impl MediaSource for DemoMediaSource {
    async fn list_media(&self) -> Result<Vec<MediaRecord>> {
        // The listing carries no counts; engagement comes from per-post lookups
        Ok(self
            .ad
            .media
            .iter()
            .map(|m| MediaRecord {
                like_count: None,
                comments_count: None,
                ..m.clone()
            })
            .collect())
    }

    async fn engagement(&self, media_id: &str) -> Result<i64> {
        if self.failing.contains(media_id) {
            return Err(HedgeError::EngagementUnavailable(media_id.to_string()));
        }
        self.ad
            .media
            .iter()
            .find(|m| m.id == media_id)
            .map(MediaRecord::engagement)
            .ok_or_else(|| HedgeError::EngagementUnavailable(media_id.to_string()))
    }

    fn name(&self) -> &str {
        "DemoMedia"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MAX_MEDIA_ITEMS;
    use crate::model::TrendDirection;
    use crate::strategy::HedgePolicy;

    #[tokio::test]
    async fn test_fetch_enriches_engagement() {
        let source = DemoMediaSource::for_ad("up-1").unwrap();
        let media = source.fetch_media().await.unwrap();

        assert_eq!(media.len(), 12);
        assert_eq!(media[0].like_count, Some(120));
        assert_eq!(media[0].comments_count, Some(0));
    }

    #[tokio::test]
    async fn test_failed_lookup_degrades_to_zero() {
        let source = DemoMediaSource::for_ad("up-1")
            .unwrap()
            .with_failures(["up1_3", "up1_7"]);
        let media = source.fetch_media().await.unwrap();

        assert_eq!(media.len(), 12);
        assert_eq!(media[3].engagement(), 0);
        assert_eq!(media[7].engagement(), 0);
        assert_eq!(media[4].engagement(), 300);
    }

    #[tokio::test]
    async fn test_fetched_media_feeds_policy() {
        let source = DemoMediaSource::for_ad("under-2").unwrap();
        let media = source.fetch_media().await.unwrap();
        let evaluation = HedgePolicy::default().evaluate(&media);
        assert_eq!(evaluation.metrics.trend_direction, TrendDirection::Down);
    }

    #[tokio::test]
    async fn test_fetch_caps_item_count() {
        let mut ad = demo::find_ad("up-2").unwrap();
        let extra = ad.media.clone();
        for round in 0..2 {
            ad.media.extend(extra.iter().map(|m| MediaRecord {
                id: format!("{}_r{round}", m.id),
                ..m.clone()
            }));
        }
        assert!(ad.media.len() > MAX_MEDIA_ITEMS);

        let media = DemoMediaSource::new(ad).fetch_media().await.unwrap();
        assert_eq!(media.len(), MAX_MEDIA_ITEMS);
    }

    #[test]
    fn test_unknown_ad() {
        assert!(DemoMediaSource::for_ad("missing").is_err());
    }
}
