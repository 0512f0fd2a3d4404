//! Engagement Analysis
//!
//! Turns raw post engagement into volatility and trend statistics.

mod volatility;

pub use volatility::{TREND_SENSITIVITY, VolatilityAnalyzer};
