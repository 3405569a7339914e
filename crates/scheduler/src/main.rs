//! Periodic trigger process.
//!
//! Calls the API's crawl-and-send endpoint for the tracked coins on a fixed
//! interval, authenticating with a static API token. Runs as a separate
//! process from the API server.

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use coinpulse_common::config::AppConfig;

struct CoinScheduler {
    http: reqwest::Client,
    api_url: String,
    api_token: String,
    interval: Duration,
    tracked_coins: Vec<String>,
}

impl CoinScheduler {
    fn new(config: &AppConfig, api_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_token,
            interval: Duration::from_secs(config.update_interval_minutes * 60),
            tracked_coins: config.tracked_coins.clone(),
        }
    }

    /// Trigger one crawl-and-send run for the tracked coins.
    async fn send_update(&self) -> anyhow::Result<()> {
        let url = format!(
            "{}/crawl-and-send/specific?symbols={}",
            self.api_url,
            self.tracked_coins.join(",")
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .send()
            .await?;

        if response.status().is_success() {
            let result: serde_json::Value = response.json().await?;
            tracing::info!(result = %result, "Update sent successfully");
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Failed to send update: {} - {}", status, body);
        }

        Ok(())
    }

    /// Run the scheduler loop indefinitely. After a failed run the loop
    /// retries after one minute instead of waiting a full interval.
    async fn run(&self) -> anyhow::Result<()> {
        tracing::info!(
            interval_minutes = self.interval.as_secs() / 60,
            coins = %self.tracked_coins.join(", "),
            "Scheduler started"
        );

        loop {
            match self.send_update().await {
                Ok(()) => {
                    tracing::info!(
                        "Waiting {} minutes until next update...",
                        self.interval.as_secs() / 60
                    );
                    tokio::time::sleep(self.interval).await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Scheduler run failed, retrying in 60s");
                    tokio::time::sleep(Duration::from_secs(60)).await;
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coinpulse_scheduler=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let Some(api_token) = config.api_token.clone() else {
        anyhow::bail!("API_TOKEN environment variable is required");
    };

    let scheduler = CoinScheduler::new(&config, api_token);

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = scheduler.run() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Scheduler exited with error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("CoinPulse scheduler stopped.");
    Ok(())
}
