//! Read-only coin quote routes. Protected by the API token gate.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use coinpulse_common::error::AppError;

use crate::middleware::auth::ApiCaller;
use crate::routes::parse_symbols;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/coins", get(get_coins))
        .route("/coins/specific", get(get_specific_coins))
}

/// GET /coins — Top 50 coins by market cap, without sending to Telegram.
async fn get_coins(
    State(state): State<AppState>,
    _caller: ApiCaller,
) -> Result<Json<serde_json::Value>, AppError> {
    let coins = state.market.get_top_coins(50).await?;
    let count = coins.len();

    Ok(Json(json!({
        "status": "success",
        "coins": coins,
        "count": count,
    })))
}

#[derive(Debug, Deserialize)]
struct SymbolsQuery {
    /// Comma-separated list of coin symbols (e.g. "BTC,TON,SOL")
    symbols: String,
}

/// GET /coins/specific — Quotes for the requested symbols only.
async fn get_specific_coins(
    State(state): State<AppState>,
    _caller: ApiCaller,
    Query(query): Query<SymbolsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let symbols = parse_symbols(&query.symbols)?;
    let coins = state.market.get_specific_coins(&symbols).await?;
    let count = coins.len();

    Ok(Json(json!({
        "status": "success",
        "coins": coins,
        "count": count,
        "requested_symbols": symbols,
    })))
}
