//! Telegram delivery over the Bot HTTP API.
//!
//! External collaborator: the API server hands it pre-formatted messages
//! after a request has been authenticated and the coin data fetched.

use std::time::Duration;

use serde_json::json;

use coinpulse_common::error::AppError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Sends messages to a fixed Telegram channel via the Bot API.
#[derive(Debug, Clone)]
pub struct TelegramSender {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
    channel_id: String,
}

impl TelegramSender {
    pub fn new(bot_token: String, channel_id: String) -> Self {
        Self::with_api_base(TELEGRAM_API_BASE.to_string(), bot_token, channel_id)
    }

    /// Construct against a non-default API base (used by tests to point at
    /// a local stub server).
    pub fn with_api_base(api_base: String, bot_token: String, channel_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base,
            bot_token,
            channel_id,
        }
    }

    /// Send a single message to the channel, HTML parse mode.
    pub async fn send_message(&self, text: &str) -> Result<(), AppError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);

        self.http
            .post(&url)
            .json(&json!({
                "chat_id": self.channel_id,
                "text": text,
                "parse_mode": "HTML",
            }))
            .send()
            .await?
            .error_for_status()?;

        tracing::info!(chat_id = %self.channel_id, "Message sent to Telegram");
        Ok(())
    }

    /// Send several messages sequentially, spaced 100 ms apart to stay
    /// under the Bot API rate limit. Returns the number delivered; fails
    /// only when every message was rejected.
    pub async fn send_multiple_messages(&self, messages: &[String]) -> Result<usize, AppError> {
        let mut sent = 0usize;
        for message in messages {
            match self.send_message(message).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to send Telegram message");
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tracing::info!(sent, total = messages.len(), "Telegram batch delivered");
        if sent == 0 && !messages.is_empty() {
            return Err(AppError::Internal(
                "Failed to send any messages to Telegram".to_string(),
            ));
        }
        Ok(sent)
    }
}
