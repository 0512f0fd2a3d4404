//! Application State

use std::sync::Arc;

use hedge_engine::{HedgeConfig, HedgePolicy, VolatilityAnalyzer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Hedge policy, owning the loaded configuration
    pub policy: Arc<HedgePolicy>,
}

impl AppState {
    pub fn new(config: HedgeConfig) -> Self {
        Self {
            policy: Arc::new(HedgePolicy::new(config)),
        }
    }

    pub fn config(&self) -> &HedgeConfig {
        self.policy.config()
    }

    pub fn analyzer(&self) -> VolatilityAnalyzer {
        VolatilityAnalyzer::from_config(self.config())
    }
}
