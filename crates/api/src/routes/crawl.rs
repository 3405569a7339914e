//! Crawl-and-send routes: fetch quotes and deliver them to Telegram.
//! Protected by the API token gate.

use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use coinpulse_common::error::AppError;
use coinpulse_common::types::Coin;
use coinpulse_crawler::format_coin_message;
use coinpulse_notifier::TelegramSender;

use crate::middleware::auth::ApiCaller;
use crate::routes::parse_symbols;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/crawl-and-send", post(crawl_and_send))
        .route("/crawl-and-send/specific", post(crawl_and_send_specific))
}

#[derive(Debug, Deserialize)]
struct CrawlParams {
    /// If true, send each coin as a separate message. If false (default),
    /// send all coins in one message.
    #[serde(default)]
    send_multiple: bool,
    /// Number of top coins to fetch and send (default: 5, max: 50).
    #[serde(default = "default_max_coins")]
    max_coins: u32,
}

fn default_max_coins() -> u32 {
    5
}

#[derive(Debug, Deserialize)]
struct CrawlSpecificParams {
    /// Comma-separated list of coin symbols (e.g. "BTC,TON,SOL")
    symbols: String,
    #[serde(default)]
    send_multiple: bool,
}

/// POST /crawl-and-send — Fetch the top coins and deliver them to Telegram.
async fn crawl_and_send(
    State(state): State<AppState>,
    caller: ApiCaller,
    Query(params): Query<CrawlParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let telegram = require_telegram(&state)?;

    if !(1..=50).contains(&params.max_coins) {
        return Err(AppError::Validation(
            "max_coins must be between 1 and 50".to_string(),
        ));
    }

    let coins = state.market.get_top_coins(params.max_coins).await?;
    if coins.is_empty() {
        return Err(AppError::Internal("Failed to fetch coin data".to_string()));
    }

    let messages_sent = deliver(telegram, &coins, params.send_multiple).await?;

    tracing::info!(
        client = %caller.token.name,
        coins = coins.len(),
        messages_sent,
        "Crawl-and-send completed"
    );

    Ok(Json(json!({
        "status": "success",
        "coins_count": coins.len(),
        "messages_sent": messages_sent,
        "send_multiple": params.send_multiple,
    })))
}

/// POST /crawl-and-send/specific — Fetch the requested symbols and deliver
/// them to Telegram.
async fn crawl_and_send_specific(
    State(state): State<AppState>,
    caller: ApiCaller,
    Query(params): Query<CrawlSpecificParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let telegram = require_telegram(&state)?;

    let symbols = parse_symbols(&params.symbols)?;
    let coins = state.market.get_specific_coins(&symbols).await?;
    if coins.is_empty() {
        return Err(AppError::NotFound(format!(
            "No data found for symbols: {}",
            symbols.join(", ")
        )));
    }

    let messages_sent = deliver(telegram, &coins, params.send_multiple).await?;

    tracing::info!(
        client = %caller.token.name,
        coins = coins.len(),
        messages_sent,
        "Crawl-and-send (specific) completed"
    );

    Ok(Json(json!({
        "status": "success",
        "coins_count": coins.len(),
        "messages_sent": messages_sent,
        "send_multiple": params.send_multiple,
        "requested_symbols": symbols,
    })))
}

fn require_telegram(state: &AppState) -> Result<&TelegramSender, AppError> {
    state
        .telegram
        .as_ref()
        .ok_or_else(|| AppError::Config("Telegram configuration missing".to_string()))
}

/// Format the coins and hand them to the notifier, either as one combined
/// message or one message per coin. Returns the number of messages sent.
async fn deliver(
    telegram: &TelegramSender,
    coins: &[Coin],
    send_multiple: bool,
) -> Result<usize, AppError> {
    let messages: Vec<String> = coins
        .iter()
        .enumerate()
        .map(|(i, coin)| format_coin_message(coin, i + 1))
        .collect();

    if send_multiple {
        telegram.send_multiple_messages(&messages).await
    } else {
        telegram.send_message(&messages.join("\n")).await?;
        Ok(1)
    }
}
