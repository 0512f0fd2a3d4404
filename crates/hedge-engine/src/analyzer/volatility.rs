//! Volatility Analyzer
//!
//! Computes mean engagement, coefficient of variation, a half-split trend
//! and a risk level for a batch of posts.
//!
//! ```text
//!  posts (chronological)     first half        second half
//!  ┌──┬──┬──┬──┬──┬──┐      ┌──┬──┬──┐        ┌──┬──┬──┐
//!  │▇▇│▆▆│▅▅│▄▄│▃▃│▂▂│  ──▶ │▇▇│▆▆│▅▅│  vs.   │▄▄│▃▃│▂▂│  ──▶ delta < -10% of mean ──▶ down
//!  └──┴──┴──┴──┴──┴──┘      └──┴──┴──┘        └──┴──┴──┘
//! ```
//!
//! Trend and risk are decided on unrounded statistics; only the returned
//! record is rounded.

use chrono::{DateTime, Utc};

use crate::config::HedgeConfig;
use crate::model::{EngagementMetrics, EngagementSample, MediaRecord, RiskLevel, TrendDirection};

/// Fraction of mean engagement the half-split delta must exceed to count as a trend
pub const TREND_SENSITIVITY: f64 = 0.1;

/// Ordered trend rule; the first match wins, `Stable` otherwise
struct TrendRule {
    direction: TrendDirection,
    applies: fn(delta: f64, threshold: f64) -> bool,
}

const TREND_RULES: [TrendRule; 2] = [
    TrendRule {
        direction: TrendDirection::Up,
        applies: rising,
    },
    TrendRule {
        direction: TrendDirection::Down,
        applies: falling,
    },
];

fn rising(delta: f64, threshold: f64) -> bool {
    delta > threshold
}

fn falling(delta: f64, threshold: f64) -> bool {
    delta < -threshold
}

/// Inputs to the risk rules
struct RiskInputs {
    volatility: f64,
    volatility_threshold: f64,
    trend: TrendDirection,
}

/// Ordered risk rule; the first match wins, `Low` otherwise
struct RiskRule {
    level: RiskLevel,
    applies: fn(&RiskInputs) -> bool,
}

const RISK_RULES: [RiskRule; 2] = [
    RiskRule {
        level: RiskLevel::High,
        applies: extreme_or_declining,
    },
    RiskRule {
        level: RiskLevel::Medium,
        applies: volatile_or_flat,
    },
];

fn extreme_or_declining(inputs: &RiskInputs) -> bool {
    inputs.volatility > 2.0 * inputs.volatility_threshold || inputs.trend == TrendDirection::Down
}

// A flat history never rates low: stagnant income is itself a risk.
fn volatile_or_flat(inputs: &RiskInputs) -> bool {
    inputs.volatility > inputs.volatility_threshold || inputs.trend == TrendDirection::Stable
}

/// Stateless analyzer parameterized by the volatility cutoff
#[derive(Clone, Copy, Debug)]
pub struct VolatilityAnalyzer {
    volatility_threshold: f64,
}

impl VolatilityAnalyzer {
    pub fn new(volatility_threshold: f64) -> Self {
        Self { volatility_threshold }
    }

    pub fn from_config(config: &HedgeConfig) -> Self {
        Self::new(config.volatility_threshold)
    }

    /// Analyze posts delivered by the media collaborator.
    ///
    /// Missing counts become zero. Posts with unreadable timestamps still
    /// count; they stay behind the post that preceded them in the input.
    pub fn analyze_media(&self, records: &[MediaRecord]) -> EngagementMetrics {
        let samples: Vec<EngagementSample> = records.iter().map(MediaRecord::to_sample).collect();

        let undated = samples.iter().filter(|s| s.timestamp.is_none()).count();
        if undated > 0 {
            tracing::debug!(undated, "Media with unreadable timestamps kept in input order");
        }

        self.analyze(&samples)
    }

    /// Compute engagement metrics. Total: every input yields a full record.
    pub fn analyze(&self, samples: &[EngagementSample]) -> EngagementMetrics {
        // An undated post borrows the key of the dated post before it in the
        // input (or the earliest instant), so the stable sort keeps it there
        let mut carried = DateTime::<Utc>::MIN_UTC;
        let mut posts: Vec<(DateTime<Utc>, i64)> = samples
            .iter()
            .filter(|s| s.engagement >= 0)
            .map(|s| {
                if let Some(timestamp) = s.timestamp {
                    carried = timestamp;
                }
                (carried, s.engagement)
            })
            .collect();

        if posts.is_empty() {
            return EngagementMetrics::EMPTY;
        }

        // Stable: equal keys keep input order, which fixes the half split
        posts.sort_by_key(|&(key, _)| key);

        let values: Vec<f64> = posts.iter().map(|&(_, e)| e as f64).collect();
        let count = values.len() as f64;

        let average = values.iter().sum::<f64>() / count;
        let variance = values
            .iter()
            .map(|v| (v - average).powi(2))
            .sum::<f64>()
            / count;
        let volatility = if average > 0.0 {
            variance.sqrt() / average
        } else {
            0.0
        };

        let mid_point = values.len() / 2;
        let first_half = half_average(&values[..mid_point]);
        let second_half = half_average(&values[mid_point..]);

        let trend = classify_trend(second_half - first_half, average * TREND_SENSITIVITY);
        let risk = classify_risk(&RiskInputs {
            volatility,
            volatility_threshold: self.volatility_threshold,
            trend,
        });

        let metrics = EngagementMetrics {
            average_engagement: round_to(average, 100.0),
            volatility_score: round_to(volatility, 1000.0),
            trend_direction: trend,
            risk_level: risk,
        };

        tracing::debug!(
            posts = posts.len(),
            average = metrics.average_engagement,
            volatility = metrics.volatility_score,
            trend = %trend,
            risk = %risk,
            "Analyzed engagement"
        );

        metrics
    }
}

/// Mean of one half; the divisor floor of 1 covers the empty first half of a single post
fn half_average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len().max(1) as f64
}

fn classify_trend(delta: f64, threshold: f64) -> TrendDirection {
    TREND_RULES
        .iter()
        .find(|rule| (rule.applies)(delta, threshold))
        .map_or(TrendDirection::Stable, |rule| rule.direction)
}

fn classify_risk(inputs: &RiskInputs) -> RiskLevel {
    RISK_RULES
        .iter()
        .find(|rule| (rule.applies)(inputs))
        .map_or(RiskLevel::Low, |rule| rule.level)
}

fn round_to(value: f64, factor: f64) -> f64 {
    (value * factor).round() / factor
}
