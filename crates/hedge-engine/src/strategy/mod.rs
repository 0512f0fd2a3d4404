//! Hedge Strategies
//!
//! Maps engagement metrics to a treasury swap recommendation.

mod hedge;

pub use hedge::{HedgeEvaluation, HedgePolicy};
