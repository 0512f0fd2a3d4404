//! Demo Ad Campaigns
//!
//! Fixed engagement histories for trying the dashboard without connecting a
//! social account. Timestamps hang off a fixed base date so every render
//! produces identical data.

use chrono::{Duration, NaiveDate, NaiveTime, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::error::{HedgeError, Result};
use crate::model::{MediaRecord, MediaType};

pub const DEMO_USERNAME: &str = "demo_creator";

/// Demo posts end the day before this date (midnight UTC)
const FIXED_BASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 1, 22) {
    Some(date) => date,
    None => panic!("invalid demo base date"),
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoCategory {
    /// Declining reach, expected to trigger a hedge to the stable asset
    Underperforming,
    /// Rising reach, expected to allocate to the growth asset
    PerformingWell,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DemoAd {
    pub id: String,
    pub label: String,
    pub category: DemoCategory,
    pub media: Vec<MediaRecord>,
}

impl DemoAd {
    fn new(
        id: &str,
        label: &str,
        category: DemoCategory,
        prefix: &str,
        engagement: &[i64],
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
            media: make_media_list(engagement, prefix),
        }
    }
}

/// One post per day ending the day before the base date.
/// Engagement splits 85/15 into likes and comments (floored).
fn make_media_list(engagement: &[i64], prefix: &str) -> Vec<MediaRecord> {
    let base = FIXED_BASE_DATE.and_time(NaiveTime::MIN).and_utc();
    let n = engagement.len() as i64;

    engagement
        .iter()
        .enumerate()
        .map(|(i, &e)| {
            let published = base - Duration::days(n - i as i64);
            let mut record = MediaRecord::new(
                format!("{prefix}_{i}"),
                published.to_rfc3339_opts(SecondsFormat::Millis, true),
            )
            .with_counts(e * 85 / 100, e * 15 / 100);
            record.media_type = MediaType::Image;
            record.username = Some(DEMO_USERNAME.into());
            record
        })
        .collect()
}

pub fn underperforming_ads() -> Vec<DemoAd> {
    use DemoCategory::Underperforming;
    vec![
        DemoAd::new(
            "under-1",
            "Summer Collection (Declining reach)",
            Underperforming,
            "under1",
            &[520, 480, 450, 410, 380, 340, 310, 280, 250, 220, 200, 180],
        ),
        DemoAd::new(
            "under-2",
            "Brand Collab Q1 (Drop-off)",
            Underperforming,
            "under2",
            &[680, 620, 550, 490, 420, 360, 300, 250, 200, 160, 130, 100],
        ),
        DemoAd::new(
            "under-3",
            "Story Series (Low retention)",
            Underperforming,
            "under3",
            &[400, 370, 340, 310, 280, 250, 220, 190, 165, 140, 120, 95],
        ),
    ]
}

pub fn performing_well_ads() -> Vec<DemoAd> {
    use DemoCategory::PerformingWell;
    vec![
        DemoAd::new(
            "up-1",
            "Viral Reel (Trending)",
            PerformingWell,
            "up1",
            &[120, 160, 200, 250, 300, 360, 420, 480, 540, 600, 660, 720],
        ),
        DemoAd::new(
            "up-2",
            "Product Launch (Strong growth)",
            PerformingWell,
            "up2",
            &[80, 130, 190, 260, 340, 430, 520, 620, 730, 850, 980, 1120],
        ),
        DemoAd::new(
            "up-3",
            "Tutorial Series (Rising engagement)",
            PerformingWell,
            "up3",
            &[200, 240, 285, 335, 390, 450, 520, 595, 680, 770, 870, 980],
        ),
    ]
}

pub fn all_ads() -> Vec<DemoAd> {
    let mut ads = underperforming_ads();
    ads.extend(performing_well_ads());
    ads
}

pub fn find_ad(id: &str) -> Result<DemoAd> {
    all_ads()
        .into_iter()
        .find(|ad| ad.id == id)
        .ok_or_else(|| HedgeError::UnknownDemoAd(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HedgeBranch, TrendDirection};
    use crate::strategy::HedgePolicy;

    #[test]
    fn test_timestamps_are_fixed() {
        let ad = find_ad("under-1").unwrap();
        assert_eq!(ad.media.len(), 12);
        assert_eq!(ad.media[0].timestamp, "2025-01-10T00:00:00.000Z");
        assert_eq!(ad.media[11].timestamp, "2025-01-21T00:00:00.000Z");
        assert!(ad.media.iter().all(|m| m.published_at().is_some()));
    }

    #[test]
    fn test_engagement_split() {
        let ad = find_ad("under-3").unwrap();
        // 95 -> 80 likes + 14 comments
        let last = ad.media.last().unwrap();
        assert_eq!(last.like_count, Some(80));
        assert_eq!(last.comments_count, Some(14));
        assert_eq!(last.engagement(), 94);
    }

    #[test]
    fn test_underperforming_ads_hedge_to_stable() {
        let policy = HedgePolicy::default();
        for ad in underperforming_ads() {
            let evaluation = policy.evaluate(&ad.media);
            assert_eq!(evaluation.metrics.trend_direction, TrendDirection::Down, "{}", ad.id);
            assert_eq!(evaluation.recommendation.branch, HedgeBranch::DefensiveHedge, "{}", ad.id);
        }
    }

    #[test]
    fn test_performing_ads_allocate_to_growth() {
        let policy = HedgePolicy::default();
        for ad in performing_well_ads() {
            let evaluation = policy.evaluate(&ad.media);
            assert_eq!(evaluation.metrics.trend_direction, TrendDirection::Up, "{}", ad.id);
            assert_eq!(evaluation.recommendation.branch, HedgeBranch::CaptureUpside, "{}", ad.id);
        }
    }

    #[test]
    fn test_unknown_ad() {
        assert!(matches!(find_ad("nope"), Err(HedgeError::UnknownDemoAd(_))));
        assert_eq!(all_ads().len(), 6);
    }
}
