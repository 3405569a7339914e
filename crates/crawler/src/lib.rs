pub mod client;
pub mod format;

pub use client::CoinMarketCapClient;
pub use format::format_coin_message;
