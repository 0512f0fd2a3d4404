//! # hedge-engine
//!
//! Links a creator's social engagement history to a treasury hedge
//! recommendation.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌────────────────────┐   ┌──────────────────┐   ┌────────────────┐
//! │ MediaSource  │──▶│ VolatilityAnalyzer │──▶│   HedgePolicy    │──▶│ swap quote API │
//! │ (posts)      │   │ mean, CV, trend,   │   │ decision table   │   │ (external)     │
//! │              │   │ risk level         │   │ sell X / buy Y   │   │                │
//! └──────────────┘   └────────────────────┘   └──────────────────┘   └────────────────┘
//! ```
//!
//! Both stages are pure and synchronous. They take an explicit
//! [`HedgeConfig`] and can be called from any number of threads without
//! coordination.
//!
//! ## Example
//!
//! ```rust
//! use hedge_engine::{HedgeConfig, HedgePolicy, VolatilityAnalyzer, demo};
//!
//! let config = HedgeConfig::default();
//! let ad = demo::find_ad("under-1").unwrap();
//!
//! let metrics = VolatilityAnalyzer::from_config(&config).analyze_media(&ad.media);
//! let recommendation = HedgePolicy::new(config).recommend(&metrics);
//!
//! assert!(recommendation.is_defensive());
//! ```

pub mod analyzer;
pub mod config;
pub mod demo;
pub mod error;
pub mod media;
pub mod model;
pub mod strategy;

pub use analyzer::VolatilityAnalyzer;
pub use config::HedgeConfig;
pub use error::{HedgeError, Result};
pub use model::{
    Asset, EngagementMetrics, EngagementSample, HedgeBranch, HedgeRecommendation, MediaRecord,
    RiskLevel, TrendDirection,
};
pub use strategy::{HedgeEvaluation, HedgePolicy};
