//! Domain Models
//!
//! Core data types flowing through the hedge pipeline:
//!
//! ```text
//! MediaRecord ──▶ EngagementSample ──▶ EngagementMetrics ──▶ HedgeRecommendation
//!  (wire shape)    (cleaned input)      (analyzer output)      (policy output)
//! ```
//!
//! Engagement statistics are plain `f64`. Swap amounts use `rust_decimal` -
//! never use f64 for money!

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{HedgeError, Result};

/// Kind of post returned by the media listing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    #[default]
    Image,
    Video,
    CarouselAlbum,
}

/// A social post as delivered by the media-retrieval collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Platform media id
    pub id: String,

    #[serde(default)]
    pub media_type: MediaType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// ISO-8601 publish time
    pub timestamp: String,

    /// Likes, absent when the platform withheld the metric
    #[serde(default)]
    pub like_count: Option<i64>,

    /// Comments, absent when the platform withheld the metric
    #[serde(default)]
    pub comments_count: Option<i64>,
}

impl MediaRecord {
    pub fn new(id: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            media_type: MediaType::Image,
            media_url: None,
            permalink: None,
            username: None,
            timestamp: timestamp.into(),
            like_count: None,
            comments_count: None,
        }
    }

    pub fn with_counts(mut self, likes: i64, comments: i64) -> Self {
        self.like_count = Some(likes);
        self.comments_count = Some(comments);
        self
    }

    /// Likes plus comments, each missing count substituted with zero
    pub fn engagement(&self) -> i64 {
        self.like_count
            .unwrap_or(0)
            .saturating_add(self.comments_count.unwrap_or(0))
    }

    /// Parse the publish time; see [`parse_timestamp`] for accepted forms
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Apply default substitution. A post whose timestamp cannot be read
    /// still counts, as an undated sample.
    pub fn to_sample(&self) -> EngagementSample {
        EngagementSample {
            engagement: self.engagement(),
            timestamp: self.published_at(),
        }
    }
}

/// ISO-8601 forms carrying an explicit offset (a trailing `Z` is rewritten to `+0000`)
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Offset-less forms, read as UTC
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 publish time.
///
/// Accepts RFC 3339, the Graph API colon-less offset (`+0000`), hour-only
/// offsets (`+00`), minute precision, date-times without an offset (UTC)
/// and bare dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let zoned = raw
        .strip_suffix(|c| c == 'Z' || c == 'z')
        .map(|rest| format!("{rest}+0000"));
    let with_offset = zoned.as_deref().unwrap_or(raw);

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(with_offset, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        })
}

/// One post's engagement at its publish time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementSample {
    /// Likes + comments. Negative values are malformed and ignored by analysis.
    pub engagement: i64,

    /// `None` when the publish time was unreadable
    pub timestamp: Option<DateTime<Utc>>,
}

impl EngagementSample {
    pub fn new(engagement: i64, timestamp: DateTime<Utc>) -> Self {
        Self {
            engagement,
            timestamp: Some(timestamp),
        }
    }

    pub fn undated(engagement: i64) -> Self {
        Self {
            engagement,
            timestamp: None,
        }
    }
}

/// Direction of engagement between the earlier and later half of posts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        })
    }
}

/// Income risk classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        })
    }
}

/// Volatility and trend statistics for a batch of posts
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    /// Mean engagement per post, 2 decimal places
    pub average_engagement: f64,

    /// Coefficient of variation (stddev / mean), 3 decimal places
    pub volatility_score: f64,

    pub trend_direction: TrendDirection,

    pub risk_level: RiskLevel,
}

impl EngagementMetrics {
    /// Result for an empty (or fully filtered) batch
    pub const EMPTY: Self = Self {
        average_engagement: 0.0,
        volatility_score: 0.0,
        trend_direction: TrendDirection::Stable,
        risk_level: RiskLevel::Low,
    };
}

impl Default for EngagementMetrics {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// A tradable token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Ticker symbol (e.g., "ETH", "USDC")
    pub symbol: String,

    /// Token address, passed opaquely to the swap-quote service
    pub address: String,

    /// Number of decimals in one whole token
    pub decimals: u8,
}

impl Asset {
    pub fn new(symbol: impl Into<String>, address: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            address: address.into(),
            decimals,
        }
    }

    /// Same token, compared by address (case-insensitive hex)
    pub fn same_token(&self, other: &Asset) -> bool {
        self.address.eq_ignore_ascii_case(&other.address)
    }

    /// Convert a whole-token amount into integer base units.
    ///
    /// `0.01` ETH (18 decimals) becomes `10_000_000_000_000_000`.
    pub fn to_base_units(&self, amount: Decimal) -> Result<u128> {
        let invalid = |reason: String| HedgeError::InvalidAmount {
            symbol: self.symbol.clone(),
            reason,
        };

        if amount <= Decimal::ZERO {
            return Err(invalid("amount must be positive".into()));
        }
        if amount.normalize().scale() > u32::from(self.decimals) {
            return Err(invalid(format!(
                "more than {} decimal places",
                self.decimals
            )));
        }

        let mut units = amount;
        for _ in 0..self.decimals {
            units = units
                .checked_mul(Decimal::TEN)
                .ok_or_else(|| invalid("amount too large".into()))?;
        }

        // Integral after scaling, so the mantissa at scale 0 is the value
        u128::try_from(units.trunc().normalize().mantissa())
            .map_err(|_| invalid("amount too large".into()))
    }
}

/// Which way a swap moves treasury exposure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    GrowthToStable,
    StableToGrowth,
}

/// The policy row that produced a recommendation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HedgeBranch {
    /// Declining and volatile: move into the stable asset
    DefensiveHedge,
    /// Rising: move into the growth asset
    CaptureUpside,
    /// Stable, or declining without volatility
    BalancedGrowth,
}

impl HedgeBranch {
    pub fn direction(self) -> SwapDirection {
        match self {
            HedgeBranch::DefensiveHedge => SwapDirection::GrowthToStable,
            HedgeBranch::CaptureUpside | HedgeBranch::BalancedGrowth => {
                SwapDirection::StableToGrowth
            }
        }
    }

    pub fn reasoning(self) -> &'static str {
        match self {
            HedgeBranch::DefensiveHedge => {
                "Engagement is declining with high volatility. Hedging into stablecoins \
                 protects your treasury from creator income instability."
            }
            HedgeBranch::CaptureUpside => {
                "Engagement is trending up. Allocating to the growth asset captures upside \
                 from creator growth."
            }
            HedgeBranch::BalancedGrowth => {
                "Engagement is stable. Maintaining exposure to growth assets with a \
                 balanced allocation."
            }
        }
    }
}

/// Which asset to sell, which to buy, and why
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HedgeRecommendation {
    pub branch: HedgeBranch,

    /// Asset to sell
    pub recommended_source_asset: Asset,

    /// Asset to buy
    pub recommended_destination_asset: Asset,

    pub reasoning: String,
}

impl HedgeRecommendation {
    /// Address of the asset to sell
    pub fn token_in(&self) -> &str {
        &self.recommended_source_asset.address
    }

    /// Address of the asset to buy
    pub fn token_out(&self) -> &str {
        &self.recommended_destination_asset.address
    }

    pub fn is_defensive(&self) -> bool {
        self.branch.direction() == SwapDirection::GrowthToStable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eth() -> Asset {
        Asset::new("eth", "0x0000000000000000000000000000000000000000", 18)
    }

    fn usdc() -> Asset {
        Asset::new("usdc", "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238", 6)
    }

    #[test]
    fn test_engagement_defaults_missing_counts() {
        let bare = MediaRecord::new("1", "2025-01-21T00:00:00Z");
        assert_eq!(bare.engagement(), 0);

        let mut likes_only = bare.clone();
        likes_only.like_count = Some(42);
        assert_eq!(likes_only.engagement(), 42);

        let both = bare.with_counts(85, 15);
        assert_eq!(both.engagement(), 100);
    }

    #[test]
    fn test_published_at_formats() {
        let rfc = MediaRecord::new("1", "2025-01-21T08:30:00Z");
        let graph = MediaRecord::new("2", "2025-01-21T08:30:00+0000");
        assert!(rfc.published_at().is_some());
        assert_eq!(rfc.published_at(), graph.published_at());

        let garbage = MediaRecord::new("3", "yesterday").with_counts(7, 1);
        assert!(garbage.published_at().is_none());
        assert_eq!(garbage.to_sample(), EngagementSample::undated(8));
    }

    #[test]
    fn test_parse_timestamp_iso_forms() {
        let midnight = parse_timestamp("2025-01-21T00:00:00Z").unwrap();
        let half_past = parse_timestamp("2025-01-21T08:30:00Z").unwrap();

        assert_eq!(parse_timestamp("2025-01-21"), Some(midnight));
        assert_eq!(parse_timestamp("2025-01-21T08:30:00"), Some(half_past));
        assert_eq!(parse_timestamp("2025-01-21T08:30"), Some(half_past));
        assert_eq!(parse_timestamp("2025-01-21T08:30Z"), Some(half_past));
        assert_eq!(parse_timestamp("2025-01-21T08:30:00.000+00"), Some(half_past));
        assert_eq!(parse_timestamp("2025-01-21T10:30:00+02:00"), Some(half_past));
        assert_eq!(parse_timestamp(" 2025-01-21 08:30:00 "), Some(half_past));
        assert_eq!(parse_timestamp("2025-13-40"), None);
    }

    #[test]
    fn test_media_record_wire_shape() {
        let json = r#"{
            "id": "17890",
            "media_type": "CAROUSEL_ALBUM",
            "timestamp": "2025-01-21T00:00:00+0000",
            "like_count": 12
        }"#;
        let record: MediaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.media_type, MediaType::CarouselAlbum);
        assert_eq!(record.comments_count, None);
        assert_eq!(record.engagement(), 12);
    }

    #[test]
    fn test_metrics_serialize_camel_case() {
        let value = serde_json::to_value(EngagementMetrics::EMPTY).unwrap();
        assert_eq!(value["averageEngagement"], 0.0);
        assert_eq!(value["volatilityScore"], 0.0);
        assert_eq!(value["trendDirection"], "stable");
        assert_eq!(value["riskLevel"], "low");
    }

    #[test]
    fn test_base_units() {
        assert_eq!(eth().to_base_units(dec!(0.01)).unwrap(), 10_000_000_000_000_000);
        assert_eq!(usdc().to_base_units(dec!(25.5)).unwrap(), 25_500_000);
        assert_eq!(usdc().to_base_units(dec!(1.000000)).unwrap(), 1_000_000);
    }

    #[test]
    fn test_base_units_rejects_bad_amounts() {
        assert!(usdc().to_base_units(Decimal::ZERO).is_err());
        assert!(usdc().to_base_units(dec!(-1)).is_err());
        assert!(usdc().to_base_units(dec!(0.0000001)).is_err());
        assert!(eth().to_base_units(Decimal::MAX).is_err());
    }

    #[test]
    fn test_same_token_ignores_case() {
        let lower = Asset::new("USDC", "0x1c7d4b196cb0c7b01d743fbc6116a902379c7238", 6);
        assert!(usdc().same_token(&lower));
        assert!(!usdc().same_token(&eth()));
    }
}
