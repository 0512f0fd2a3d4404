//! Hedge Dashboard HTTP Server
//!
//! Axum-based REST API running the engagement → hedge pipeline for the
//! dashboard frontend. Social login, swap quoting and wallet signing happen
//! elsewhere; this server only turns posts into a recommendation.

mod handlers;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hedge_engine::HedgeConfig;

use crate::handlers::{
    analyze_engagement, evaluate_demo_ad, evaluate_hedge, health_check, list_demo_ads,
    recommend_hedge,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = HedgeConfig::from_env()?;
    tracing::info!(
        "Volatility threshold {} | growth {} | stable {} | chain {}",
        config.volatility_threshold,
        config.growth_asset.symbol,
        config.stable_asset.symbol,
        config.chain_id
    );

    let app = app(AppState::new(config));

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("hedge-server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                 - Health check");
    tracing::info!("  POST /api/engagement/analyze - Posts to metrics");
    tracing::info!("  POST /api/hedge/recommend    - Metrics to recommendation");
    tracing::info!("  POST /api/hedge/evaluate     - Posts to metrics + recommendation");
    tracing::info!("  GET  /api/demo/ads           - List demo ads");
    tracing::info!("  GET  /api/demo/ads/{{id}}      - Evaluate a demo ad");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Pipeline
        .route("/api/engagement/analyze", post(analyze_engagement))
        .route("/api/hedge/recommend", post(recommend_hedge))
        .route("/api/hedge/evaluate", post(evaluate_hedge))
        // Demo data
        .route("/api/demo/ads", get(list_demo_ads))
        .route("/api/demo/ads/{id}", get(evaluate_demo_ad))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
