//! Facility lookup proxies.
//!
//! Provider failures answer 500 with an empty list alongside the message so
//! map views can render "no results" without special-casing errors.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::api_types::ApiError;
use super::helpers::NearbyRequest;
use crate::facilities::{
    search_osm, DetailsOutcome, Facility, NearbyOutcome, PlacesApi,
    DEFAULT_PLACES_RADIUS_METERS,
};
use crate::server::AppState;

pub const MISSING_API_KEY_MESSAGE: &str = "Google Maps API key not configured";

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub results: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Remaining provider fields such as `next_page_token`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsRequest {
    pub place_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    pub result: Value,
}

#[derive(Debug, Serialize)]
pub struct OsmResponse {
    pub hospitals: Vec<Facility>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn places_client(state: &AppState) -> Result<&dyn PlacesApi, ApiError> {
    match state.places.as_deref() {
        Some(places) => Ok(places),
        None => {
            tracing::error!("{}", MISSING_API_KEY_MESSAGE);
            Err(ApiError::missing_config(MISSING_API_KEY_MESSAGE))
        }
    }
}

fn nearby_failure(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(NearbyResponse {
            status: None,
            results: Vec::new(),
            error: Some(message),
            extra: Map::new(),
        }),
    )
        .into_response()
}

/// POST /api/hospitals/nearby
pub async fn nearby_hospitals(
    State(state): State<AppState>,
    payload: Result<Json<NearbyRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let places = places_client(&state)?;
    let Json(request) = payload?;
    let location = request.location()?;
    let radius = request.radius.unwrap_or(DEFAULT_PLACES_RADIUS_METERS);

    let response = match places.nearby(location, radius).await {
        Ok(NearbyOutcome::Results { results, extra }) => {
            tracing::info!(count = results.len(), radius, "Places nearby search complete");
            Json(NearbyResponse {
                status: Some("OK".to_string()),
                results,
                error: None,
                extra,
            })
            .into_response()
        }
        Ok(NearbyOutcome::Empty) => Json(NearbyResponse {
            status: Some("ZERO_RESULTS".to_string()),
            results: Vec::new(),
            error: None,
            extra: Map::new(),
        })
        .into_response(),
        Ok(NearbyOutcome::ProviderError { status, message }) => {
            tracing::error!(%status, ?message, "Google Places nearby search failed");
            nearby_failure(format!("Google Places API error: {}", status))
        }
        Err(e) => {
            tracing::error!("Google Places nearby search failed: {}", e);
            nearby_failure("Failed to fetch nearby hospitals".to_string())
        }
    };
    Ok(response)
}

/// POST /api/hospitals/details
pub async fn hospital_details(
    State(state): State<AppState>,
    payload: Result<Json<DetailsRequest>, JsonRejection>,
) -> Result<Json<DetailsResponse>, ApiError> {
    let places = places_client(&state)?;
    let Json(request) = payload?;
    let place_id = request
        .place_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Place ID is required"))?;

    match places.details(&place_id).await {
        Ok(DetailsOutcome::Found(result)) => Ok(Json(DetailsResponse { result })),
        Ok(DetailsOutcome::ProviderError { status, message }) => {
            tracing::error!(%place_id, %status, ?message, "Google Places details failed");
            Err(ApiError::upstream(format!("Google Places API error: {}", status)))
        }
        Err(e) => {
            tracing::error!(%place_id, "Google Places details failed: {}", e);
            Err(ApiError::upstream("Failed to fetch place details"))
        }
    }
}

/// POST /api/hospitals/osm-nearby
pub async fn osm_nearby_hospitals(
    State(state): State<AppState>,
    payload: Result<Json<NearbyRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let location = request.location()?;

    let search = search_osm(&*state.overpass, location, request.radius).await;
    let count = search.facilities.len();
    let status = if search.is_error() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(OsmResponse {
            hospitals: search.facilities,
            count,
            error: search.error,
        }),
    )
        .into_response())
}
