//! Nearby hospital and clinic lookup.
//!
//! Two independent providers, chosen by the caller rather than merged:
//! - `places`: Google Places nearby search and details
//! - `overpass`: OpenStreetMap data via Overpass, normalized locally

mod model;
mod overpass;
mod places;

pub use model::{Coordinate, Facility, FacilitySearch, FacilitySource, Provenance};
pub use overpass::{
    build_query, normalize, search_nearby as search_osm, OverpassApi, OverpassCenter,
    OverpassClient, OverpassElement, OverpassResponse, ADDRESS_NOT_AVAILABLE,
    DEFAULT_OSM_RADIUS_METERS, DEFAULT_OVERPASS_URL, QUERY_TIMEOUT_SECS,
};
pub use places::{
    place_to_facility, DetailsOutcome, GooglePlacesClient, NearbyOutcome, PlacesApi,
    PlacesEnvelope, DEFAULT_PLACES_BASE_URL, DEFAULT_PLACES_RADIUS_METERS, DETAIL_FIELDS,
    UNNAMED_FACILITY,
};

/// Google Places nearby search normalized into facility records.
///
/// The HTTP route passes raw Places results through; this is for callers that
/// want the same record shape OpenStreetMap searches produce.
pub async fn search_places(
    api: &dyn PlacesApi,
    location: Coordinate,
    radius_meters: Option<u32>,
) -> FacilitySearch {
    let radius = radius_meters.unwrap_or(DEFAULT_PLACES_RADIUS_METERS);
    match api.nearby(location, radius).await {
        Ok(NearbyOutcome::Results { results, .. }) => {
            FacilitySearch::found(results.iter().filter_map(place_to_facility).collect())
        }
        Ok(NearbyOutcome::Empty) => FacilitySearch::found(Vec::new()),
        Ok(NearbyOutcome::ProviderError { status, message }) => {
            tracing::error!(%status, ?message, "Google Places nearby search failed");
            FacilitySearch::failed(format!("Google Places API error: {}", status))
        }
        Err(e) => {
            tracing::error!("Google Places nearby search failed: {}", e);
            FacilitySearch::failed(format!("Failed to fetch nearby hospitals: {}", e))
        }
    }
}
