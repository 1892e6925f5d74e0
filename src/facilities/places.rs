//! Google Places nearby search and place details.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::model::{Coordinate, Facility, FacilitySource, Provenance};
use crate::error::{ProviderError, ProviderResult};
use crate::http_client::HttpClient;

/// Places web service root.
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Search radius in meters when the caller gives none.
pub const DEFAULT_PLACES_RADIUS_METERS: u32 = 10_000;

/// Place type filter for nearby search.
pub const PLACE_TYPE: &str = "hospital";

/// Fields requested from the details endpoint.
pub const DETAIL_FIELDS: &[&str] = &[
    "name",
    "formatted_address",
    "formatted_phone_number",
    "opening_hours",
    "rating",
    "website",
    "geometry",
    "photos",
    "types",
    "business_status",
];

/// Name given to results the provider returned without one.
pub const UNNAMED_FACILITY: &str = "Unnamed Hospital";

/// Raw status envelope shared by the Places endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesEnvelope {
    pub status: String,
    #[serde(default)]
    pub results: Vec<Value>,
    pub result: Option<Value>,
    pub error_message: Option<String>,
    /// Everything else the provider sent (`next_page_token`,
    /// `html_attributions`, ...), kept for pass-through.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Nearby search outcome, classified from the provider status.
#[derive(Debug, Clone, PartialEq)]
pub enum NearbyOutcome {
    /// `OK`: raw provider results plus the rest of the envelope, passed
    /// through untouched.
    Results {
        results: Vec<Value>,
        extra: Map<String, Value>,
    },
    /// `ZERO_RESULTS`: a success with nothing nearby.
    Empty,
    /// Any other status.
    ProviderError {
        status: String,
        message: Option<String>,
    },
}

impl NearbyOutcome {
    pub fn from_envelope(envelope: PlacesEnvelope) -> Self {
        match envelope.status.as_str() {
            "OK" => NearbyOutcome::Results {
                results: envelope.results,
                extra: envelope.extra,
            },
            "ZERO_RESULTS" => NearbyOutcome::Empty,
            _ => NearbyOutcome::ProviderError {
                status: envelope.status,
                message: envelope.error_message,
            },
        }
    }

    /// Raw results; empty for `Empty` and errors.
    pub fn results(&self) -> &[Value] {
        match self {
            NearbyOutcome::Results { results, .. } => results,
            _ => &[],
        }
    }
}

/// Details fetch outcome. Every non-`OK` status is an error here,
/// including `ZERO_RESULTS` and `NOT_FOUND`.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsOutcome {
    Found(Value),
    ProviderError {
        status: String,
        message: Option<String>,
    },
}

impl DetailsOutcome {
    pub fn from_envelope(envelope: PlacesEnvelope) -> Self {
        match (envelope.status.as_str(), envelope.result) {
            ("OK", Some(result)) => DetailsOutcome::Found(result),
            ("OK", None) => DetailsOutcome::ProviderError {
                status: "OK".to_string(),
                message: Some("response carried no result".to_string()),
            },
            (_, _) => DetailsOutcome::ProviderError {
                status: envelope.status,
                message: envelope.error_message,
            },
        }
    }
}

/// Commercial places provider.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    async fn nearby(
        &self,
        location: Coordinate,
        radius_meters: u32,
    ) -> ProviderResult<NearbyOutcome>;

    async fn details(&self, place_id: &str) -> ProviderResult<DetailsOutcome>;
}

/// Google Places web service client.
pub struct GooglePlacesClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
}

impl GooglePlacesClient {
    /// Fails when the key is blank so a misconfigured deployment is caught
    /// at startup rather than on the first request.
    pub fn new(
        http: HttpClient,
        api_key: &str,
        base_url: impl Into<String>,
    ) -> ProviderResult<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ProviderError::MissingConfig(
                "Google Maps API key is empty".to_string(),
            ));
        }
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn nearby(
        &self,
        location: Coordinate,
        radius_meters: u32,
    ) -> ProviderResult<NearbyOutcome> {
        let url = format!("{}/nearbysearch/json", self.base_url);
        let query = [
            ("location", format!("{},{}", location.lat, location.lng)),
            ("radius", radius_meters.to_string()),
            ("type", PLACE_TYPE.to_string()),
            ("key", self.api_key.clone()),
        ];
        let envelope: PlacesEnvelope = self.http.get_json(&url, &query).await?;
        Ok(NearbyOutcome::from_envelope(envelope))
    }

    async fn details(&self, place_id: &str) -> ProviderResult<DetailsOutcome> {
        let url = format!("{}/details/json", self.base_url);
        let query = [
            ("place_id", place_id.to_string()),
            ("fields", DETAIL_FIELDS.join(",")),
            ("key", self.api_key.clone()),
        ];
        let envelope: PlacesEnvelope = self.http.get_json(&url, &query).await?;
        Ok(DetailsOutcome::from_envelope(envelope))
    }
}

#[derive(Debug, Deserialize)]
struct PlaceSummary {
    place_id: Option<String>,
    name: Option<String>,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    geometry: Option<PlaceGeometry>,
    #[serde(default)]
    types: Vec<String>,
    formatted_phone_number: Option<String>,
    website: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: Option<PlaceLatLng>,
}

#[derive(Debug, Deserialize)]
struct PlaceLatLng {
    lat: Option<f64>,
    lng: Option<f64>,
}

/// Convert a raw Places result into a facility.
///
/// Results without a name get a placeholder; results without a position
/// are dropped.
pub fn place_to_facility(raw: &Value) -> Option<Facility> {
    let place: PlaceSummary = serde_json::from_value(raw.clone()).ok()?;
    let location = place.geometry.as_ref()?.location.as_ref()?;
    let location = Coordinate::new(location.lat?, location.lng?);

    let place_id = place.place_id.unwrap_or_default();
    let name = place
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| UNNAMED_FACILITY.to_string());
    let address = place
        .vicinity
        .or(place.formatted_address)
        .unwrap_or_else(|| super::overpass::ADDRESS_NOT_AVAILABLE.to_string());
    let source_type = place
        .types
        .first()
        .cloned()
        .unwrap_or_else(|| PLACE_TYPE.to_string());

    Some(Facility {
        id: place_id.clone(),
        kind: "place".to_string(),
        name,
        address,
        location,
        phone: place.formatted_phone_number,
        website: place.website,
        opening_hours: None,
        // Places carries no emergency-department attribute.
        emergency: false,
        beds: None,
        operator: None,
        wheelchair: None,
        provenance: Provenance {
            source: FacilitySource::GooglePlaces,
            source_id: place_id,
            source_type,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> PlacesEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn ok_passes_results_through() {
        let outcome = NearbyOutcome::from_envelope(envelope(json!({
            "status": "OK",
            "results": [{"place_id": "abc", "custom": 1}]
        })));
        assert_eq!(outcome.results(), &[json!({"place_id": "abc", "custom": 1})]);
    }

    #[test]
    fn ok_keeps_paging_fields() {
        let outcome = NearbyOutcome::from_envelope(envelope(json!({
            "status": "OK",
            "next_page_token": "TOKEN123",
            "html_attributions": ["x"],
            "results": [{"place_id": "a"}]
        })));
        match outcome {
            NearbyOutcome::Results { results, extra } => {
                assert_eq!(results, vec![json!({"place_id": "a"})]);
                assert_eq!(extra["next_page_token"], "TOKEN123");
                assert_eq!(extra["html_attributions"], json!(["x"]));
                assert!(!extra.contains_key("status"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn zero_results_is_empty_success() {
        let outcome = NearbyOutcome::from_envelope(envelope(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })));
        assert_eq!(outcome, NearbyOutcome::Empty);
        assert!(outcome.results().is_empty());
    }

    #[test]
    fn denied_is_provider_error() {
        let outcome = NearbyOutcome::from_envelope(envelope(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })));
        assert_eq!(
            outcome,
            NearbyOutcome::ProviderError {
                status: "REQUEST_DENIED".to_string(),
                message: Some("The provided API key is invalid.".to_string()),
            }
        );
    }

    #[test]
    fn details_not_found_is_error() {
        let outcome = DetailsOutcome::from_envelope(envelope(json!({"status": "NOT_FOUND"})));
        assert!(matches!(
            outcome,
            DetailsOutcome::ProviderError { ref status, .. } if status == "NOT_FOUND"
        ));
    }

    #[test]
    fn details_ok_returns_result() {
        let outcome = DetailsOutcome::from_envelope(envelope(json!({
            "status": "OK",
            "result": {"name": "Black Lion Hospital"}
        })));
        assert_eq!(outcome, DetailsOutcome::Found(json!({"name": "Black Lion Hospital"})));
    }

    #[test]
    fn detail_fields_are_fixed() {
        assert_eq!(DETAIL_FIELDS.len(), 10);
        assert!(DETAIL_FIELDS.contains(&"geometry"));
        assert!(DETAIL_FIELDS.contains(&"business_status"));
    }

    #[test]
    fn blank_key_is_rejected() {
        let http = HttpClient::new(None).unwrap();
        assert!(matches!(
            GooglePlacesClient::new(http, "  ", DEFAULT_PLACES_BASE_URL),
            Err(ProviderError::MissingConfig(_))
        ));
    }

    #[test]
    fn place_without_name_gets_placeholder() {
        let facility = place_to_facility(&json!({
            "place_id": "p1",
            "vicinity": "Churchill Ave",
            "geometry": {"location": {"lat": 9.02, "lng": 38.75}},
            "types": ["hospital", "health"]
        }))
        .unwrap();
        assert_eq!(facility.name, UNNAMED_FACILITY);
        assert_eq!(facility.address, "Churchill Ave");
        assert_eq!(facility.location, Coordinate::new(9.02, 38.75));
        assert!(!facility.emergency);
        assert_eq!(facility.provenance.source_type, "hospital");
        assert_eq!(facility.provenance.source, FacilitySource::GooglePlaces);
    }

    #[test]
    fn place_without_geometry_is_dropped() {
        assert!(place_to_facility(&json!({"place_id": "p2", "name": "Nowhere"})).is_none());
    }
}
