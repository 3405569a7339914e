pub mod coins;
pub mod crawl;
pub mod health;

use axum::Router;

use coinpulse_common::error::AppError;

use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(coins::router())
        .merge(crawl::router())
        .with_state(state)
}

/// Split a comma-separated symbols query into cleaned uppercase symbols.
pub(crate) fn parse_symbols(raw: &str) -> Result<Vec<String>, AppError> {
    let symbols: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    if symbols.is_empty() {
        return Err(AppError::Validation("No symbols provided".to_string()));
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_cleaned_and_uppercased() {
        let symbols = parse_symbols(" btc , eth,SOL ").unwrap();
        assert_eq!(symbols, vec!["BTC", "ETH", "SOL"]);
    }

    #[test]
    fn empty_symbols_rejected() {
        assert!(parse_symbols("").is_err());
        assert!(parse_symbols(" , ,").is_err());
    }
}
