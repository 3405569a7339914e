use clap::{Parser, Subcommand};

/// CoinPulse — manage API tokens for the crawler service
#[derive(Parser)]
#[command(name = "coinpulse-admin", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all API tokens
    List,

    /// Create a new API token
    Create {
        /// Human-readable name for the credential holder (e.g. "mobile-app")
        name: String,
        /// Token value; generated from a CSPRNG when omitted
        token: Option<String>,
    },

    /// Delete an API token by name
    Delete {
        /// Name of the token to remove
        name: String,
    },
}
