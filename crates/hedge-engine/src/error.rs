//! Error Types for the Hedge Engine
//!
//! The analyzer and the policy are total and never return these. Only the
//! edges that touch configuration, user-entered amounts, or media sources do.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HedgeError>;

#[derive(Error, Debug)]
pub enum HedgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid amount for {symbol}: {reason}")]
    InvalidAmount {
        symbol: String,
        reason: String,
    },

    #[error("Engagement unavailable for media {0}")]
    EngagementUnavailable(String),

    #[error("Demo ad not found: {0}")]
    UnknownDemoAd(String),
}

impl HedgeError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            HedgeError::Config(_) => "CONFIG_ERROR",
            HedgeError::InvalidAmount { .. } => "INVALID_AMOUNT",
            HedgeError::EngagementUnavailable(_) => "ENGAGEMENT_UNAVAILABLE",
            HedgeError::UnknownDemoAd(_) => "NOT_FOUND",
        }
    }
}
