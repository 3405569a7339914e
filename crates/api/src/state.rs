//! Shared application state for the Axum API server.

use sqlx::PgPool;

use coinpulse_common::config::AppConfig;
use coinpulse_crawler::CoinMarketCapClient;
use coinpulse_notifier::TelegramSender;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: AppConfig,
    pub market: CoinMarketCapClient,
    /// None when TELEGRAM_TOKEN / TELEGRAM_CHANNEL are not configured;
    /// the crawl-and-send routes reject requests in that case.
    pub telegram: Option<TelegramSender>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let market =
            CoinMarketCapClient::new(config.cmc_base_url.clone(), config.cmc_api_key.clone());

        let telegram = match (&config.telegram_token, &config.telegram_channel) {
            (Some(token), Some(channel)) => {
                Some(TelegramSender::new(token.clone(), channel.clone()))
            }
            _ => None,
        };

        Self {
            pool,
            config,
            market,
            telegram,
        }
    }
}
