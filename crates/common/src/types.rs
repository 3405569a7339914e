use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted API token record.
///
/// `name` identifies the credential holder (e.g. "admin", "mobile-app");
/// `token` is the opaque secret clients present in the Authorization header.
/// Both are unique across the table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ApiToken {
    pub id: i32,
    pub name: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single coin quote as served by the API and formatted for Telegram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub currency: String,
}
