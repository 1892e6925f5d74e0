//! Session currency resolution.
//!
//! Every network path here degrades to the default currency. Currency display
//! is cosmetic, so callers always get a config back and never an error.

use std::sync::Arc;

use serde::Serialize;

use super::detect::{CountryDetector, ReverseGeocoder};
use super::store::{PreferenceStore, COUNTRY_CODE_KEY};
use super::table::{default_currency, lookup, resolve, CurrencyConfig};

/// How the active currency was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Read back from the preference store.
    Cached,
    /// Detected from the caller's IP address.
    Detected,
    /// Reverse geocoded from a coordinate.
    Coordinates,
    /// Chosen explicitly by the user.
    Override,
    /// Nothing resolved; static default.
    Default,
}

/// The active currency plus a user-facing confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub currency: &'static CurrencyConfig,
    pub source: ResolutionSource,
    pub message: String,
}

impl Resolution {
    fn new(currency: &'static CurrencyConfig, source: ResolutionSource) -> Self {
        let message = match source {
            ResolutionSource::Override => format!(
                "Currency changed to {} ({})",
                currency.name, currency.code
            ),
            _ => format!(
                "Prices shown in {} ({}) for {}",
                currency.name, currency.code, currency.country
            ),
        };
        Self {
            currency,
            source,
            message,
        }
    }
}

/// Resolves and persists the session's display currency.
#[derive(Clone)]
pub struct CurrencyResolver {
    store: Arc<dyn PreferenceStore>,
    ip_detector: Arc<dyn CountryDetector>,
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl CurrencyResolver {
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        ip_detector: Arc<dyn CountryDetector>,
        geocoder: Arc<dyn ReverseGeocoder>,
    ) -> Self {
        Self {
            store,
            ip_detector,
            geocoder,
        }
    }

    /// Use the cached country if it is known, otherwise detect by IP.
    ///
    /// A successful detection is persisted even when the country has no
    /// currency of its own (the default is stored instead). A failed
    /// detection persists nothing.
    pub async fn resolve_on_load(&self) -> Resolution {
        if let Some(config) = self.cached().await {
            tracing::debug!(country = config.country_code, "Using cached currency");
            return Resolution::new(config, ResolutionSource::Cached);
        }

        match self.ip_detector.detect_country().await {
            Ok(country_code) => {
                let config = resolve(&country_code);
                tracing::info!(
                    detected = %country_code,
                    currency = config.code,
                    "Detected currency from IP"
                );
                self.persist(config).await;
                Resolution::new(config, ResolutionSource::Detected)
            }
            Err(e) => {
                tracing::warn!("IP country detection failed, using default currency: {}", e);
                Resolution::new(default_currency(), ResolutionSource::Default)
            }
        }
    }

    /// Reverse geocode a coordinate to a country and adopt its currency.
    pub async fn detect_from_coordinates(&self, lat: f64, lng: f64) -> Resolution {
        match self.geocoder.country_at(lat, lng).await {
            Ok(country_code) => {
                let config = resolve(&country_code);
                tracing::info!(
                    lat,
                    lng,
                    detected = %country_code,
                    currency = config.code,
                    "Detected currency from coordinates"
                );
                self.persist(config).await;
                Resolution::new(config, ResolutionSource::Coordinates)
            }
            Err(e) => {
                tracing::warn!(
                    lat,
                    lng,
                    "Coordinate country detection failed, using default currency: {}",
                    e
                );
                Resolution::new(default_currency(), ResolutionSource::Default)
            }
        }
    }

    /// Explicitly select a country. Unknown codes select the default.
    pub async fn set_country(&self, country_code: &str) -> Resolution {
        let config = resolve(country_code);
        if lookup(country_code).is_none() {
            tracing::info!(requested = country_code, "Unknown country, using default currency");
        }
        self.persist(config).await;
        let resolution = Resolution::new(config, ResolutionSource::Override);
        tracing::info!("{}", resolution.message);
        resolution
    }

    /// The cached selection if it names a known country.
    pub async fn cached(&self) -> Option<&'static CurrencyConfig> {
        match self.store.get(COUNTRY_CODE_KEY).await {
            Ok(Some(code)) => {
                let config = lookup(&code);
                if config.is_none() {
                    tracing::debug!(cached = %code, "Ignoring unknown cached country code");
                }
                config
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read currency preference: {}", e);
                None
            }
        }
    }

    async fn persist(&self, config: &CurrencyConfig) {
        if let Err(e) = self.store.set(COUNTRY_CODE_KEY, config.country_code).await {
            tracing::warn!("Failed to persist currency preference: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::store::InMemoryPreferenceStore;
    use crate::error::{ProviderError, ProviderResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedDetector {
        result: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl FixedDetector {
        fn new(result: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CountryDetector for FixedDetector {
        async fn detect_country(&self) -> ProviderResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .map(str::to_string)
                .ok_or_else(|| ProviderError::Malformed("no country".to_string()))
        }
    }

    #[async_trait]
    impl ReverseGeocoder for FixedDetector {
        async fn country_at(&self, _lat: f64, _lng: f64) -> ProviderResult<String> {
            self.detect_country().await
        }
    }

    fn resolver(
        store: Arc<InMemoryPreferenceStore>,
        ip: Arc<FixedDetector>,
        geo: Arc<FixedDetector>,
    ) -> CurrencyResolver {
        CurrencyResolver::new(store, ip, geo)
    }

    #[tokio::test]
    async fn cached_country_skips_detection() {
        let store = Arc::new(InMemoryPreferenceStore::new());
        store.set(COUNTRY_CODE_KEY, "KE").await.unwrap();
        let ip = FixedDetector::new(Some("ET"));

        let res = resolver(store, ip.clone(), FixedDetector::new(None))
            .resolve_on_load()
            .await;

        assert_eq!(res.currency.code, "KES");
        assert_eq!(res.source, ResolutionSource::Cached);
        assert_eq!(ip.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_cached_country_triggers_detection() {
        let store = Arc::new(InMemoryPreferenceStore::new());
        store.set(COUNTRY_CODE_KEY, "ZZ").await.unwrap();
        let ip = FixedDetector::new(Some("ET"));

        let res = resolver(store.clone(), ip.clone(), FixedDetector::new(None))
            .resolve_on_load()
            .await;

        assert_eq!(res.currency.code, "ETB");
        assert_eq!(res.source, ResolutionSource::Detected);
        assert_eq!(ip.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            store.get(COUNTRY_CODE_KEY).await.unwrap().as_deref(),
            Some("ET")
        );
    }

    #[tokio::test]
    async fn detected_unknown_country_persists_default() {
        let store = Arc::new(InMemoryPreferenceStore::new());
        let res = resolver(
            store.clone(),
            FixedDetector::new(Some("AQ")),
            FixedDetector::new(None),
        )
        .resolve_on_load()
        .await;

        assert_eq!(res.currency.code, "USD");
        assert_eq!(res.source, ResolutionSource::Detected);
        assert_eq!(
            store.get(COUNTRY_CODE_KEY).await.unwrap().as_deref(),
            Some("US")
        );
    }

    #[tokio::test]
    async fn failed_detection_falls_back_without_persisting() {
        let store = Arc::new(InMemoryPreferenceStore::new());
        let res = resolver(
            store.clone(),
            FixedDetector::new(None),
            FixedDetector::new(None),
        )
        .resolve_on_load()
        .await;

        assert_eq!(res.currency, default_currency());
        assert_eq!(res.source, ResolutionSource::Default);
        assert_eq!(store.get(COUNTRY_CODE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn coordinates_resolve_country() {
        let store = Arc::new(InMemoryPreferenceStore::new());
        let res = resolver(
            store.clone(),
            FixedDetector::new(None),
            FixedDetector::new(Some("ET")),
        )
        .detect_from_coordinates(9.0, 38.7)
        .await;

        assert_eq!(res.currency.code, "ETB");
        assert_eq!(res.source, ResolutionSource::Coordinates);
        assert_eq!(
            store.get(COUNTRY_CODE_KEY).await.unwrap().as_deref(),
            Some("ET")
        );
    }

    #[tokio::test]
    async fn coordinate_failure_falls_back() {
        let res = resolver(
            Arc::new(InMemoryPreferenceStore::new()),
            FixedDetector::new(None),
            FixedDetector::new(None),
        )
        .detect_from_coordinates(0.0, 0.0)
        .await;

        assert_eq!(res.source, ResolutionSource::Default);
        assert_eq!(res.currency.code, "USD");
    }

    #[tokio::test]
    async fn override_supersedes_previous_choice() {
        let store = Arc::new(InMemoryPreferenceStore::new());
        let r = resolver(
            store.clone(),
            FixedDetector::new(Some("ET")),
            FixedDetector::new(None),
        );

        r.resolve_on_load().await;
        let res = r.set_country("gb").await;
        assert_eq!(res.currency.code, "GBP");
        assert_eq!(res.source, ResolutionSource::Override);
        assert!(res.message.contains("British Pound"));

        let reloaded = r.resolve_on_load().await;
        assert_eq!(reloaded.currency.code, "GBP");
        assert_eq!(reloaded.source, ResolutionSource::Cached);
    }

    #[tokio::test]
    async fn override_persists_over_torn_preference_file() {
        use crate::currency::store::FilePreferenceStore;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"carelink.country_code": "E"#).unwrap();

        let r = CurrencyResolver::new(
            Arc::new(FilePreferenceStore::new(&path)),
            FixedDetector::new(None),
            FixedDetector::new(None),
        );
        assert_eq!(r.set_country("GB").await.currency.code, "GBP");

        let reloaded = r.resolve_on_load().await;
        assert_eq!(reloaded.currency.code, "GBP");
        assert_eq!(reloaded.source, ResolutionSource::Cached);
    }

    #[tokio::test]
    async fn override_with_unknown_code_selects_default() {
        let store = Arc::new(InMemoryPreferenceStore::new());
        let res = resolver(
            store.clone(),
            FixedDetector::new(None),
            FixedDetector::new(None),
        )
        .set_country("XX")
        .await;

        assert_eq!(res.currency.code, "USD");
        assert_eq!(
            store.get(COUNTRY_CODE_KEY).await.unwrap().as_deref(),
            Some("US")
        );
    }
}
