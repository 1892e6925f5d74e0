//! Price conversion and display formatting.

use super::table::{rate_for, CurrencyConfig};

/// Convert an amount in the reference currency (USD) into `currency_code`.
pub fn convert(amount: f64, currency_code: &str) -> f64 {
    amount * rate_for(currency_code)
}

/// Render `amount` as `<symbol><grouped amount>.<2 decimals>`.
///
/// Grouping follows en-US (`,` every three digits). Every currency gets two
/// decimals, including ones that normally have none such as JPY.
pub fn format(amount: f64, config: &CurrencyConfig) -> String {
    format!("{}{}", config.symbol, group_thousands(amount))
}

/// Convert from the reference currency into `config`'s currency and format it.
pub fn convert_and_format(amount: f64, config: &CurrencyConfig) -> String {
    format(convert(amount, config.code), config)
}

fn group_thousands(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.004 rounds to "0.00"; don't render it as negative.
    let negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::table::{default_currency, resolve};

    #[test]
    fn convert_is_linear() {
        for code in ["USD", "ETB", "JPY", "NGN", "XXX"] {
            for amount in [0.0, 1.0, 12.5, 999.99, 1_000_000.0] {
                let once = convert(amount, code);
                let twice = convert(2.0 * amount, code);
                assert!((twice - 2.0 * once).abs() < 1e-6, "{code} {amount}");
            }
        }
    }

    #[test]
    fn convert_uses_table_rate() {
        assert!((convert(100.0, "ETB") - 5650.0).abs() < 1e-9);
        assert_eq!(convert(100.0, "unknown"), 100.0);
    }

    #[test]
    fn format_groups_and_pads() {
        let usd = default_currency();
        assert_eq!(format(0.0, usd), "$0.00");
        assert_eq!(format(5.5, usd), "$5.50");
        assert_eq!(format(1234.567, usd), "$1,234.57");
        assert_eq!(format(10_000_000.0, usd), "$10,000,000.00");
        assert_eq!(format(100_000.0, usd), "$100,000.00");
    }

    #[test]
    fn format_keeps_two_decimals_for_yen() {
        assert_eq!(format(1500.0, resolve("JP")), "¥1,500.00");
    }

    #[test]
    fn format_negative_and_tiny_negative() {
        let usd = default_currency();
        assert_eq!(format(-1234.5, usd), "$-1,234.50");
        assert_eq!(format(-0.001, usd), "$0.00");
    }

    #[test]
    fn convert_then_format_extremes() {
        let birr = resolve("ET");
        assert_eq!(convert_and_format(0.0, birr), "Br0.00");
        assert_eq!(convert_and_format(10_000_000.0, birr), "Br565,000,000.00");
        let out = convert_and_format(f64::MAX, birr);
        assert!(out.starts_with("Br"));
    }
}
