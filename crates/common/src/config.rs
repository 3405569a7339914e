use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Maximum number of PostgreSQL connections in the pool (default: 20)
    pub db_max_connections: u32,

    /// Port the API server binds to (default: 8000)
    pub api_port: u16,

    /// CoinMarketCap Pro API key
    pub cmc_api_key: Option<String>,

    /// CoinMarketCap API base URL (overridable for tests)
    pub cmc_base_url: String,

    /// Telegram bot token
    pub telegram_token: Option<String>,

    /// Telegram channel or chat id messages are delivered to
    pub telegram_channel: Option<String>,

    /// Base URL of the API server, used by the scheduler process
    pub api_url: String,

    /// API token the scheduler authenticates with
    pub api_token: Option<String>,

    /// Minutes between scheduled crawl-and-send runs (default: 30)
    pub update_interval_minutes: u64,

    /// Coin symbols the scheduler tracks
    pub tracked_coins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid u32"))?,
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("API_PORT must be a valid u16"))?,
            cmc_api_key: std::env::var("CMC_API_KEY").ok(),
            cmc_base_url: std::env::var("CMC_BASE_URL")
                .unwrap_or_else(|_| "https://pro-api.coinmarketcap.com/v1".to_string()),
            telegram_token: std::env::var("TELEGRAM_TOKEN").ok(),
            telegram_channel: std::env::var("TELEGRAM_CHANNEL").ok(),
            api_url: std::env::var("API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            api_token: std::env::var("API_TOKEN").ok(),
            update_interval_minutes: std::env::var("UPDATE_INTERVAL_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("UPDATE_INTERVAL_MINUTES must be a valid u64"))?,
            tracked_coins: std::env::var("TRACKED_COINS")
                .unwrap_or_else(|_| "BTC,ETH,BNB,SOL,TON,PAXG,KAG".to_string())
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}
