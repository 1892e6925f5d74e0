//! Country detection from the caller's IP address or a coordinate.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ProviderError, ProviderResult};
use crate::http_client::HttpClient;

/// Default reverse-IP geolocation endpoint.
pub const DEFAULT_IP_GEOLOCATION_URL: &str = "https://ipapi.co/json/";

/// Default reverse-geocoding endpoint.
pub const DEFAULT_REVERSE_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Nominatim zoom level for country precision.
const COUNTRY_ZOOM: &str = "3";

/// Resolves the caller's country from their public IP address.
#[async_trait]
pub trait CountryDetector: Send + Sync {
    /// ISO 3166-1 alpha-2 code, uppercase.
    async fn detect_country(&self) -> ProviderResult<String>;
}

/// Resolves a coordinate to the country containing it.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// ISO 3166-1 alpha-2 code, uppercase.
    async fn country_at(&self, lat: f64, lng: f64) -> ProviderResult<String>;
}

#[derive(Debug, Deserialize)]
struct IpLookup {
    country_code: Option<String>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// ipapi.co-compatible reverse-IP lookup.
pub struct IpApiDetector {
    http: HttpClient,
    url: String,
}

impl IpApiDetector {
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CountryDetector for IpApiDetector {
    async fn detect_country(&self) -> ProviderResult<String> {
        let lookup: IpLookup = self.http.get_json(&self.url, &[]).await?;
        if lookup.error {
            return Err(ProviderError::Status {
                provider: "IP geolocation",
                status: lookup.reason.unwrap_or_else(|| "unknown".to_string()),
            });
        }
        normalize_country_code(lookup.country_code.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ReverseLookup {
    address: Option<ReverseAddress>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseAddress {
    country_code: Option<String>,
}

/// Nominatim-compatible reverse geocoder queried at country zoom.
pub struct NominatimGeocoder {
    http: HttpClient,
    url: String,
}

impl NominatimGeocoder {
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn country_at(&self, lat: f64, lng: f64) -> ProviderResult<String> {
        let query = [
            ("format", "json".to_string()),
            ("lat", lat.to_string()),
            ("lon", lng.to_string()),
            ("zoom", COUNTRY_ZOOM.to_string()),
        ];
        let lookup: ReverseLookup = self.http.get_json(&self.url, &query).await?;
        if let Some(error) = lookup.error {
            return Err(ProviderError::Status {
                provider: "Reverse geocoding",
                status: error,
            });
        }
        normalize_country_code(
            lookup
                .address
                .as_ref()
                .and_then(|a| a.country_code.as_deref()),
        )
    }
}

/// Validate a provider-supplied country code into uppercase alpha-2 form.
pub fn normalize_country_code(raw: Option<&str>) -> ProviderResult<String> {
    let code = raw.map(str::trim).unwrap_or_default();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(ProviderError::Malformed(format!(
            "expected a two-letter country code, got {:?}",
            raw
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_lowercase_codes() {
        assert_eq!(normalize_country_code(Some("et")).unwrap(), "ET");
        assert_eq!(normalize_country_code(Some(" gb ")).unwrap(), "GB");
    }

    #[test]
    fn rejects_missing_or_odd_codes() {
        assert!(normalize_country_code(None).is_err());
        assert!(normalize_country_code(Some("")).is_err());
        assert!(normalize_country_code(Some("USA")).is_err());
        assert!(normalize_country_code(Some("1A")).is_err());
    }

    #[test]
    fn ip_lookup_error_payload_parses() {
        let lookup: IpLookup =
            serde_json::from_str(r#"{"error": true, "reason": "RateLimited"}"#).unwrap();
        assert!(lookup.error);
        assert_eq!(lookup.reason.as_deref(), Some("RateLimited"));
    }

    #[test]
    fn reverse_lookup_payload_parses() {
        let lookup: ReverseLookup = serde_json::from_str(
            r#"{"display_name": "Ethiopia", "address": {"country": "Ethiopia", "country_code": "et"}}"#,
        )
        .unwrap();
        assert_eq!(
            lookup.address.and_then(|a| a.country_code).as_deref(),
            Some("et")
        );
    }
}
