//! CoinPulse API server binary entrypoint.

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use coinpulse_auth::{SEED_TOKENS, TokenService};
use coinpulse_common::config::AppConfig;
use coinpulse_common::db::create_pool;

use coinpulse_api::routes::create_router;
use coinpulse_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("coinpulse_api=debug,coinpulse_auth=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting CoinPulse API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Create database connection pool
    let pool = create_pool(&config.database_url, config.db_max_connections).await?;

    // Run migrations and seed the fixed token set (idempotent)
    sqlx::migrate!("../../migrations").run(&pool).await?;
    TokenService::seed(&pool, SEED_TOKENS).await?;
    tracing::info!("Database migrated and API tokens seeded");

    let port = config.api_port;

    // Build application state
    let state = AppState::new(pool, config);

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
