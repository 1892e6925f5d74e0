//! Static currency and exchange-rate tables.

use serde::Serialize;

/// Display currency for a country.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyConfig {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub country_code: &'static str,
}

/// Country whose currency is used whenever nothing else resolves.
pub const DEFAULT_COUNTRY_CODE: &str = "US";

/// Currency configs keyed by ISO 3166-1 alpha-2 country code.
pub const CURRENCIES: &[CurrencyConfig] = &[
    CurrencyConfig {
        code: "USD",
        symbol: "$",
        name: "US Dollar",
        country: "United States",
        country_code: "US",
    },
    CurrencyConfig {
        code: "ETB",
        symbol: "Br",
        name: "Ethiopian Birr",
        country: "Ethiopia",
        country_code: "ET",
    },
    CurrencyConfig {
        code: "GBP",
        symbol: "£",
        name: "British Pound",
        country: "United Kingdom",
        country_code: "GB",
    },
    CurrencyConfig {
        code: "EUR",
        symbol: "€",
        name: "Euro",
        country: "Germany",
        country_code: "DE",
    },
    CurrencyConfig {
        code: "EUR",
        symbol: "€",
        name: "Euro",
        country: "France",
        country_code: "FR",
    },
    CurrencyConfig {
        code: "INR",
        symbol: "₹",
        name: "Indian Rupee",
        country: "India",
        country_code: "IN",
    },
    CurrencyConfig {
        code: "JPY",
        symbol: "¥",
        name: "Japanese Yen",
        country: "Japan",
        country_code: "JP",
    },
    CurrencyConfig {
        code: "CNY",
        symbol: "¥",
        name: "Chinese Yuan",
        country: "China",
        country_code: "CN",
    },
    CurrencyConfig {
        code: "CAD",
        symbol: "C$",
        name: "Canadian Dollar",
        country: "Canada",
        country_code: "CA",
    },
    CurrencyConfig {
        code: "AUD",
        symbol: "A$",
        name: "Australian Dollar",
        country: "Australia",
        country_code: "AU",
    },
    CurrencyConfig {
        code: "KES",
        symbol: "KSh",
        name: "Kenyan Shilling",
        country: "Kenya",
        country_code: "KE",
    },
    CurrencyConfig {
        code: "NGN",
        symbol: "₦",
        name: "Nigerian Naira",
        country: "Nigeria",
        country_code: "NG",
    },
    CurrencyConfig {
        code: "ZAR",
        symbol: "R",
        name: "South African Rand",
        country: "South Africa",
        country_code: "ZA",
    },
    CurrencyConfig {
        code: "AED",
        symbol: "د.إ",
        name: "UAE Dirham",
        country: "United Arab Emirates",
        country_code: "AE",
    },
    CurrencyConfig {
        code: "SAR",
        symbol: "﷼",
        name: "Saudi Riyal",
        country: "Saudi Arabia",
        country_code: "SA",
    },
    CurrencyConfig {
        code: "BRL",
        symbol: "R$",
        name: "Brazilian Real",
        country: "Brazil",
        country_code: "BR",
    },
    CurrencyConfig {
        code: "MXN",
        symbol: "$",
        name: "Mexican Peso",
        country: "Mexico",
        country_code: "MX",
    },
];

/// Local units per one USD.
pub const EXCHANGE_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("ETB", 56.5),
    ("GBP", 0.79),
    ("EUR", 0.92),
    ("INR", 83.12),
    ("JPY", 149.5),
    ("CNY", 7.24),
    ("CAD", 1.36),
    ("AUD", 1.53),
    ("KES", 129.5),
    ("NGN", 1550.0),
    ("ZAR", 18.65),
    ("AED", 3.67),
    ("SAR", 3.75),
    ("BRL", 4.97),
    ("MXN", 17.15),
];

/// The fallback currency config.
pub fn default_currency() -> &'static CurrencyConfig {
    CURRENCIES
        .iter()
        .find(|c| c.country_code == DEFAULT_COUNTRY_CODE)
        .unwrap_or(&CURRENCIES[0])
}

/// Look up a country code (case-insensitive, surrounding whitespace ignored).
pub fn lookup(country_code: &str) -> Option<&'static CurrencyConfig> {
    let wanted = country_code.trim();
    CURRENCIES
        .iter()
        .find(|c| c.country_code.eq_ignore_ascii_case(wanted))
}

/// Look up a country code, falling back to the default currency.
pub fn resolve(country_code: &str) -> &'static CurrencyConfig {
    lookup(country_code).unwrap_or_else(default_currency)
}

/// First config using `currency_code` (EUR maps to Germany).
pub fn by_currency_code(currency_code: &str) -> Option<&'static CurrencyConfig> {
    let wanted = currency_code.trim();
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(wanted))
}

/// Exchange rate for a currency code, falling back to the default currency's rate.
pub fn rate_for(currency_code: &str) -> f64 {
    find_rate(currency_code)
        .or_else(|| find_rate(default_currency().code))
        .unwrap_or(1.0)
}

fn find_rate(currency_code: &str) -> Option<f64> {
    EXCHANGE_RATES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(currency_code.trim()))
        .map(|(_, rate)| *rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_code_resolves_to_itself() {
        for config in CURRENCIES {
            assert_eq!(resolve(config.country_code).country_code, config.country_code);
        }
    }

    #[test]
    fn unknown_code_resolves_to_default() {
        assert_eq!(resolve("ZZ"), default_currency());
        assert_eq!(resolve(""), default_currency());
        assert_eq!(default_currency().code, "USD");
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(lookup(" et ").map(|c| c.code), Some("ETB"));
    }

    #[test]
    fn currency_code_lookup() {
        assert_eq!(by_currency_code("eur").map(|c| c.country_code), Some("DE"));
        assert!(by_currency_code("XXX").is_none());
    }

    #[test]
    fn every_currency_has_a_rate() {
        for config in CURRENCIES {
            assert!(
                find_rate(config.code).is_some(),
                "missing exchange rate for {}",
                config.code
            );
        }
    }

    #[test]
    fn unknown_currency_uses_default_rate() {
        assert_eq!(rate_for("XXX"), 1.0);
    }
}
