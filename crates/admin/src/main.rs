//! Token administration tool.
//!
//! Operated locally by a trusted administrator; never exposed over the
//! network. Each invocation performs a single operation against the token
//! store and exits.

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use coinpulse_auth::{TokenService, generate_token};
use coinpulse_common::config::AppConfig;
use coinpulse_common::db::create_pool;
use coinpulse_common::error::AppError;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Cli::parse();
    let config = AppConfig::from_env()?;

    // A single connection is enough for one administrative operation
    let pool = create_pool(&config.database_url, 1).await?;

    match args.command {
        Commands::List => {
            let tokens = TokenService::list_all(&pool).await?;
            if tokens.is_empty() {
                println!("No API tokens found");
                return Ok(());
            }

            println!("API Tokens:");
            println!("{}", "-".repeat(50));
            for token in tokens {
                println!("ID: {}", token.id);
                println!("Name: {}", token.name);
                println!("Token: {}", token.token);
                println!("Created: {}", token.created_at);
                println!("Updated: {}", token.updated_at);
                println!("{}", "-".repeat(50));
            }
        }

        Commands::Create { name, token } => {
            let token = token.unwrap_or_else(generate_token);
            let record = TokenService::create(&pool, &name, &token).await?;

            println!("Created API token:");
            println!("  Name: {}", record.name);
            println!("  Token: {}", record.token);
            println!("  Created: {}", record.created_at);
        }

        Commands::Delete { name } => {
            if !TokenService::delete_by_name(&pool, &name).await? {
                return Err(
                    AppError::NotFound(format!("Token with name '{}' not found", name)).into(),
                );
            }
            println!("Deleted API token: {}", name);
        }
    }

    Ok(())
}
