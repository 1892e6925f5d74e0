//! JSON API server for the CareLink marketplace.
//!
//! Serves:
//! - Mock booking, signup, emergency and review records
//! - Hospital lookup through Google Places and OpenStreetMap
//! - Display-currency resolution and conversion

mod handlers;
mod routes;

pub use handlers::{ApiError, INTERNAL_ERROR_MESSAGE, MISSING_API_KEY_MESSAGE};
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::currency::{
    CurrencyResolver, FilePreferenceStore, InMemoryPreferenceStore, IpApiDetector,
    NominatimGeocoder, PreferenceStore,
};
use crate::facilities::{GooglePlacesClient, OverpassApi, OverpassClient, PlacesApi};
use crate::http_client::HttpClient;
use crate::ids::{IdGenerator, UuidGenerator};

/// Shared state for the API server.
#[derive(Clone)]
pub struct AppState {
    pub ids: Arc<dyn IdGenerator>,
    /// None when no Google Maps API key is configured.
    pub places: Option<Arc<dyn PlacesApi>>,
    pub overpass: Arc<dyn OverpassApi>,
    pub currency: CurrencyResolver,
}

impl AppState {
    /// Wire production providers from settings.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let http = HttpClient::new(settings.user_agent.as_deref())?;

        let places: Option<Arc<dyn PlacesApi>> = match settings.google_maps_api_key.as_deref() {
            Some(key) if settings.has_places_key() => Some(Arc::new(GooglePlacesClient::new(
                http.clone(),
                key,
                settings.places_base_url.clone(),
            )?)),
            _ => {
                tracing::warn!("GOOGLE_MAPS_API_KEY is not set; Places endpoints will return 500");
                None
            }
        };

        let overpass = Arc::new(OverpassClient::new(
            http.clone(),
            settings.overpass_url.clone(),
            Duration::from_secs(settings.overpass_timeout_secs),
        ));

        let store: Arc<dyn PreferenceStore> = match settings.preferences_path {
            Some(ref path) => {
                tracing::debug!("Currency preference file: {}", path.display());
                Arc::new(FilePreferenceStore::new(path.clone()))
            }
            None => Arc::new(InMemoryPreferenceStore::new()),
        };
        let currency = CurrencyResolver::new(
            store,
            Arc::new(IpApiDetector::new(
                http.clone(),
                settings.ip_geolocation_url.clone(),
            )),
            Arc::new(NominatimGeocoder::new(
                http,
                settings.reverse_geocode_url.clone(),
            )),
        );

        Ok(Self {
            ids: Arc::new(UuidGenerator),
            places,
            overpass,
            currency,
        })
    }
}

/// Start the API server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_settings() -> Settings {
        Settings {
            preferences_path: None,
            ..Settings::default()
        }
    }

    #[test]
    fn without_key_places_is_disabled() {
        let state = AppState::from_settings(&offline_settings()).unwrap();
        assert!(state.places.is_none());
    }

    #[test]
    fn with_key_places_is_enabled() {
        let settings = Settings {
            google_maps_api_key: Some("test-key".to_string()),
            ..offline_settings()
        };
        let state = AppState::from_settings(&settings).unwrap();
        assert!(state.places.is_some());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let settings = Settings {
            google_maps_api_key: Some("  ".to_string()),
            ..offline_settings()
        };
        assert!(AppState::from_settings(&settings).unwrap().places.is_none());
    }
}
