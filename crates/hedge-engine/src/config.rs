//! Engine Configuration
//!
//! A single immutable value passed into the analyzer and the policy.

use serde::{Deserialize, Serialize};

use crate::error::{HedgeError, Result};
use crate::model::Asset;

/// Coefficient-of-variation cutoff used by both risk and hedge rules
pub const DEFAULT_VOLATILITY_THRESHOLD: f64 = 0.3;

/// Sepolia testnet
pub const DEFAULT_CHAIN_ID: u64 = 11_155_111;

/// Native ETH as addressed by the swap-quote API
pub const SEPOLIA_ETH_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Circle USDC on Sepolia
pub const SEPOLIA_USDC_ADDRESS: &str = "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HedgeConfig {
    /// Engagement volatility above which a declining creator is hedged
    pub volatility_threshold: f64,

    /// Volatile asset bought when engagement is healthy
    pub growth_asset: Asset,

    /// Stable asset bought when engagement deteriorates
    pub stable_asset: Asset,

    /// Chain the assets live on
    pub chain_id: u64,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            volatility_threshold: DEFAULT_VOLATILITY_THRESHOLD,
            growth_asset: Asset::new("ETH", SEPOLIA_ETH_ADDRESS, 18),
            stable_asset: Asset::new("USDC", SEPOLIA_USDC_ADDRESS, 6),
            chain_id: DEFAULT_CHAIN_ID,
        }
    }
}

impl HedgeConfig {
    /// Load from environment, falling back to defaults for unset variables.
    ///
    /// - `HEDGE_VOLATILITY_THRESHOLD`
    /// - `HEDGE_GROWTH_ASSET_ADDRESS`
    /// - `HEDGE_STABLE_ASSET_ADDRESS`
    /// - `HEDGE_CHAIN_ID`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("HEDGE_VOLATILITY_THRESHOLD") {
            config.volatility_threshold = raw.trim().parse().map_err(|_| {
                HedgeError::Config(format!("HEDGE_VOLATILITY_THRESHOLD is not a number: {raw}"))
            })?;
        }
        if let Some(address) = lookup("HEDGE_GROWTH_ASSET_ADDRESS") {
            config.growth_asset.address = address.trim().to_string();
        }
        if let Some(address) = lookup("HEDGE_STABLE_ASSET_ADDRESS") {
            config.stable_asset.address = address.trim().to_string();
        }
        if let Some(raw) = lookup("HEDGE_CHAIN_ID") {
            config.chain_id = raw.trim().parse().map_err(|_| {
                HedgeError::Config(format!("HEDGE_CHAIN_ID is not an integer: {raw}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the policy cannot honor
    pub fn validate(&self) -> Result<()> {
        if !self.volatility_threshold.is_finite() || self.volatility_threshold < 0.0 {
            return Err(HedgeError::Config(format!(
                "volatility threshold must be a non-negative number, got {}",
                self.volatility_threshold
            )));
        }
        if self.growth_asset.address.is_empty() || self.stable_asset.address.is_empty() {
            return Err(HedgeError::Config("asset addresses must not be empty".into()));
        }
        if self.growth_asset.same_token(&self.stable_asset) {
            return Err(HedgeError::Config(format!(
                "growth and stable asset must differ (both {})",
                self.growth_asset.address
            )));
        }
        Ok(())
    }
}
