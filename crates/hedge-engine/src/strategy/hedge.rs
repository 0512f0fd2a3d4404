//! Hedge Recommendation Policy
//!
//! Decision table, evaluated top to bottom, first match wins:
//!
//! | Condition                          | Swap            | Branch           |
//! |------------------------------------|-----------------|------------------|
//! | trend down AND volatility > cutoff | growth → stable | `DefensiveHedge` |
//! | trend up                           | stable → growth | `CaptureUpside`  |
//! | otherwise                          | stable → growth | `BalancedGrowth` |
//!
//! A decline without volatility falls through to `BalancedGrowth`: small
//! steady dips are not worth defensive action.

use serde::{Deserialize, Serialize};

use crate::analyzer::VolatilityAnalyzer;
use crate::config::HedgeConfig;
use crate::model::{
    Asset, EngagementMetrics, HedgeBranch, HedgeRecommendation, MediaRecord, SwapDirection,
    TrendDirection,
};

/// One row of the decision table
struct HedgeRule {
    branch: HedgeBranch,
    applies: fn(&EngagementMetrics, f64) -> bool,
}

const HEDGE_RULES: [HedgeRule; 2] = [
    HedgeRule {
        branch: HedgeBranch::DefensiveHedge,
        applies: declining_and_volatile,
    },
    HedgeRule {
        branch: HedgeBranch::CaptureUpside,
        applies: rising,
    },
];

/// Branch taken when no rule matches
const FALLBACK_BRANCH: HedgeBranch = HedgeBranch::BalancedGrowth;

fn declining_and_volatile(metrics: &EngagementMetrics, volatility_threshold: f64) -> bool {
    metrics.trend_direction == TrendDirection::Down
        && metrics.volatility_score > volatility_threshold
}

fn rising(metrics: &EngagementMetrics, _volatility_threshold: f64) -> bool {
    metrics.trend_direction == TrendDirection::Up
}

/// Hedge policy bound to a configured asset pair
#[derive(Clone, Debug)]
pub struct HedgePolicy {
    config: HedgeConfig,
}

impl HedgePolicy {
    pub fn new(config: HedgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HedgeConfig {
        &self.config
    }

    /// Decide which row of the table fires
    pub fn select_branch(&self, metrics: &EngagementMetrics) -> HedgeBranch {
        HEDGE_RULES
            .iter()
            .find(|rule| (rule.applies)(metrics, self.config.volatility_threshold))
            .map_or(FALLBACK_BRANCH, |rule| rule.branch)
    }

    /// Recommend a swap for the given metrics. Total over all metrics.
    pub fn recommend(&self, metrics: &EngagementMetrics) -> HedgeRecommendation {
        let branch = self.select_branch(metrics);
        let (source, destination) = self.assets_for(branch.direction());

        tracing::debug!(
            ?branch,
            trend = %metrics.trend_direction,
            volatility = metrics.volatility_score,
            from = %source.symbol,
            to = %destination.symbol,
            "Selected hedge"
        );

        HedgeRecommendation {
            branch,
            recommended_source_asset: source.clone(),
            recommended_destination_asset: destination.clone(),
            reasoning: branch.reasoning().to_string(),
        }
    }

    /// Analyze posts and recommend in one pass
    pub fn evaluate(&self, records: &[MediaRecord]) -> HedgeEvaluation {
        let metrics = VolatilityAnalyzer::from_config(&self.config).analyze_media(records);
        let recommendation = self.recommend(&metrics);
        HedgeEvaluation {
            metrics,
            recommendation,
        }
    }

    fn assets_for(&self, direction: SwapDirection) -> (&Asset, &Asset) {
        match direction {
            SwapDirection::GrowthToStable => (&self.config.growth_asset, &self.config.stable_asset),
            SwapDirection::StableToGrowth => (&self.config.stable_asset, &self.config.growth_asset),
        }
    }
}

impl Default for HedgePolicy {
    fn default() -> Self {
        Self::new(HedgeConfig::default())
    }
}

/// Metrics and the recommendation derived from them
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HedgeEvaluation {
    pub metrics: EngagementMetrics,
    pub recommendation: HedgeRecommendation,
}
