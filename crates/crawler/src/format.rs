//! Telegram message formatting for coin quotes.

use coinpulse_common::types::Coin;

/// Format a single coin line for a Telegram message.
///
/// Coins in the top 10 positions get a green marker, the rest red. Prices at
/// or above 1000 are shown with thousands separators and one decimal place;
/// smaller prices keep four decimal places.
pub fn format_coin_message(coin: &Coin, position: usize) -> String {
    let emoji = if position <= 10 { "🟢" } else { "🔴" };
    format!(
        "{} {}: {} {}",
        emoji,
        coin.symbol,
        format_price(coin.price),
        coin.currency
    )
}

fn format_price(price: f64) -> String {
    if price >= 1000.0 {
        group_thousands(&format!("{:.1}", price))
    } else {
        format!("{:.4}", price)
    }
}

/// Insert `,` separators into the integer part of a formatted number.
fn group_thousands(formatted: &str) -> String {
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted, None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3);
    let digits = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(symbol: &str, price: f64) -> Coin {
        Coin {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            price,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn top_ten_positions_are_green() {
        let msg = format_coin_message(&coin("BTC", 104325.53), 1);
        assert_eq!(msg, "🟢 BTC: 104,325.5 USD");

        let msg = format_coin_message(&coin("DOGE", 0.1234), 11);
        assert_eq!(msg, "🔴 DOGE: 0.1234 USD");
    }

    #[test]
    fn large_prices_get_thousands_separators() {
        assert_eq!(format_price(1000.0), "1,000.0");
        assert_eq!(format_price(104325.53), "104,325.5");
        assert_eq!(format_price(1234567.89), "1,234,567.9");
    }

    #[test]
    fn small_prices_keep_four_decimals() {
        assert_eq!(format_price(999.99), "999.9900");
        assert_eq!(format_price(0.1234), "0.1234");
        assert_eq!(format_price(3.5), "3.5000");
    }
}
