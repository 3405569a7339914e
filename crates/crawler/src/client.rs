//! CoinMarketCap Pro API client.
//!
//! External collaborator on the far side of the auth gate: handlers only
//! reach it after a request has been authenticated.

use std::collections::HashMap;

use serde::Deserialize;

use coinpulse_common::error::AppError;
use coinpulse_common::types::Coin;

/// Thin client over the CoinMarketCap `/cryptocurrency` endpoints.
#[derive(Debug, Clone)]
pub struct CoinMarketCapClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingsResponse {
    data: Vec<RawCoin>,
}

#[derive(Debug, Deserialize)]
struct QuotesResponse {
    data: HashMap<String, RawCoin>,
}

#[derive(Debug, Deserialize)]
struct RawCoin {
    symbol: String,
    name: String,
    quote: HashMap<String, RawQuote>,
}

#[derive(Debug, Deserialize)]
struct RawQuote {
    price: f64,
}

impl CoinMarketCapClient {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!("CMC_API_KEY not set, CoinMarketCap requests will be unauthenticated");
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Fetch the top coins by market cap, quoted in USD.
    pub async fn get_top_coins(&self, limit: u32) -> Result<Vec<Coin>, AppError> {
        let url = format!("{}/cryptocurrency/listings/latest", self.base_url);

        let mut request = self
            .http
            .get(&url)
            .query(&[("limit", limit.to_string()), ("convert", "USD".into())]);
        if let Some(key) = &self.api_key {
            request = request.header("X-CMC_PRO_API_KEY", key);
        }

        let response: ListingsResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(flatten_usd_quotes(response.data))
    }

    /// Fetch quotes for specific coin symbols (e.g. ["BTC", "ETH"]).
    pub async fn get_specific_coins(&self, symbols: &[String]) -> Result<Vec<Coin>, AppError> {
        let url = format!("{}/cryptocurrency/quotes/latest", self.base_url);

        let mut request = self
            .http
            .get(&url)
            .query(&[("symbol", symbols.join(",")), ("convert", "USD".into())]);
        if let Some(key) = &self.api_key {
            request = request.header("X-CMC_PRO_API_KEY", key);
        }

        let response: QuotesResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Preserve the caller's symbol order rather than the map's
        let mut data = response.data;
        let coins = symbols
            .iter()
            .filter_map(|sym| data.remove(sym))
            .collect();

        Ok(flatten_usd_quotes(coins))
    }
}

/// Flatten the nested `quote.USD` object into our `Coin` shape, skipping
/// entries without a USD quote.
fn flatten_usd_quotes(raw: Vec<RawCoin>) -> Vec<Coin> {
    raw.into_iter()
        .filter_map(|c| {
            let Some(usd) = c.quote.get("USD") else {
                tracing::warn!(symbol = %c.symbol, "Coin missing USD quote, skipping");
                return None;
            };
            Some(Coin {
                symbol: c.symbol,
                name: c.name,
                price: usd.price,
                currency: "USD".to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTINGS_FIXTURE: &str = r#"{
        "data": [
            {
                "symbol": "BTC",
                "name": "Bitcoin",
                "quote": { "USD": { "price": 104325.53 } }
            },
            {
                "symbol": "ETH",
                "name": "Ethereum",
                "quote": { "USD": { "price": 3891.2 } }
            }
        ]
    }"#;

    const QUOTES_FIXTURE: &str = r#"{
        "data": {
            "BTC": {
                "symbol": "BTC",
                "name": "Bitcoin",
                "quote": { "USD": { "price": 104325.53 } }
            },
            "SOL": {
                "symbol": "SOL",
                "name": "Solana",
                "quote": { "EUR": { "price": 120.0 } }
            }
        }
    }"#;

    #[test]
    fn listings_fixture_flattens_to_coins() {
        let parsed: ListingsResponse = serde_json::from_str(LISTINGS_FIXTURE).unwrap();
        let coins = flatten_usd_quotes(parsed.data);

        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].symbol, "BTC");
        assert_eq!(coins[0].price, 104325.53);
        assert_eq!(coins[0].currency, "USD");
    }

    #[test]
    fn coins_without_usd_quote_are_skipped() {
        let parsed: QuotesResponse = serde_json::from_str(QUOTES_FIXTURE).unwrap();
        let coins = flatten_usd_quotes(parsed.data.into_values().collect());

        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].symbol, "BTC");
    }
}
