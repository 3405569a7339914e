//! Root banner and health check endpoints. Both are unauthenticated.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "CoinPulse Crawler API",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}
