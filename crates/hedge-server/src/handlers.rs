//! HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hedge_engine::{
    demo::{self, DemoAd, DemoCategory},
    media::{DemoMediaSource, MediaSource},
    EngagementMetrics, HedgeError, HedgeEvaluation, HedgeRecommendation, MediaRecord,
};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub volatility_threshold: f64,
    pub chain_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub media: Vec<MediaRecord>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub media: Vec<MediaRecord>,

    /// Whole-token amount of the source asset to swap
    #[serde(default)]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapAmount {
    pub symbol: String,
    pub amount: Decimal,
    /// Integer base units, as a string to survive JSON number precision
    pub base_units: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub metrics: EngagementMetrics,
    pub recommendation: HedgeRecommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap_amount: Option<SwapAmount>,
}

#[derive(Debug, Serialize)]
pub struct DemoAdSummary {
    pub id: String,
    pub label: String,
    pub category: DemoCategory,
    pub posts: usize,
}

impl From<&DemoAd> for DemoAdSummary {
    fn from(ad: &DemoAd) -> Self {
        Self {
            id: ad.id.clone(),
            label: ad.label.clone(),
            category: ad.category,
            posts: ad.media.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DemoEvaluationResponse {
    pub ad: DemoAdSummary,
    #[serde(flatten)]
    pub evaluation: HedgeEvaluation,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, err: &HedgeError) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        volatility_threshold: state.config().volatility_threshold,
        chain_id: state.config().chain_id,
    })
}

/// Posts -> engagement metrics
pub async fn analyze_engagement(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Json<EngagementMetrics> {
    Json(state.analyzer().analyze_media(&payload.media))
}

/// Metrics -> hedge recommendation
pub async fn recommend_hedge(
    State(state): State<AppState>,
    Json(metrics): Json<EngagementMetrics>,
) -> Json<HedgeRecommendation> {
    Json(state.policy.recommend(&metrics))
}

/// Posts -> metrics + recommendation, optionally sizing the swap
pub async fn evaluate_hedge(
    State(state): State<AppState>,
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let HedgeEvaluation {
        metrics,
        recommendation,
    } = state.policy.evaluate(&payload.media);

    let swap_amount = payload
        .amount
        .map(|amount| {
            let source = &recommendation.recommended_source_asset;
            source.to_base_units(amount).map(|units| SwapAmount {
                symbol: source.symbol.clone(),
                amount,
                base_units: units.to_string(),
            })
        })
        .transpose()
        .map_err(|e| {
            tracing::debug!("Rejected swap amount: {}", e);
            api_error(StatusCode::BAD_REQUEST, &e)
        })?;

    Ok(Json(EvaluateResponse {
        metrics,
        recommendation,
        swap_amount,
    }))
}

/// List demo ads
pub async fn list_demo_ads() -> Json<Vec<DemoAdSummary>> {
    Json(demo::all_ads().iter().map(DemoAdSummary::from).collect())
}

/// Evaluate one demo ad through the demo media source
pub async fn evaluate_demo_ad(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DemoEvaluationResponse>, ApiError> {
    let source =
        DemoMediaSource::for_ad(&id).map_err(|e| api_error(StatusCode::NOT_FOUND, &e))?;

    let media = source.fetch_media().await.map_err(|e| {
        tracing::error!("Media fetch failed: {}", e);
        api_error(StatusCode::BAD_GATEWAY, &e)
    })?;

    Ok(Json(DemoEvaluationResponse {
        ad: DemoAdSummary::from(source.ad()),
        evaluation: state.policy.evaluate(&media),
    }))
}
