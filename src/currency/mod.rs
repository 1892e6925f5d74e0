//! Display-currency localization.
//!
//! Prices are stored in a reference currency (USD). This module picks the
//! session's display currency and converts/formats prices into it:
//! - `table`: static country -> currency and exchange-rate tables
//! - `format`: pure conversion and formatting helpers
//! - `detect`: IP and coordinate based country detection
//! - `store`: persistence for the chosen country
//! - `resolver`: the resolve/override flow tying them together

mod detect;
mod format;
mod resolver;
mod store;
mod table;

pub use detect::{
    normalize_country_code, CountryDetector, IpApiDetector, NominatimGeocoder, ReverseGeocoder,
    DEFAULT_IP_GEOLOCATION_URL, DEFAULT_REVERSE_GEOCODE_URL,
};
pub use format::{convert, convert_and_format, format};
pub use resolver::{CurrencyResolver, Resolution, ResolutionSource};
pub use store::{
    FilePreferenceStore, InMemoryPreferenceStore, PreferenceStore, StoreError, StoreResult,
    COUNTRY_CODE_KEY,
};
pub use table::{
    by_currency_code, default_currency, lookup, rate_for, resolve, CurrencyConfig, CURRENCIES,
    DEFAULT_COUNTRY_CODE, EXCHANGE_RATES,
};
