//! Display-currency endpoints.
//!
//! Resolution never fails from the caller's point of view; only malformed
//! input is rejected.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::api_types::ApiError;
use super::helpers::valid_coordinate;
use crate::currency::{
    by_currency_code, convert, default_currency, format, CurrencyConfig, Resolution, CURRENCIES,
};
use crate::facilities::Coordinate;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCurrencyRequest {
    pub country_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SupportedResponse {
    pub currencies: &'static [CurrencyConfig],
}

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    pub amount: Option<f64>,
    /// Target currency code. Defaults to the cached session currency.
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub amount: f64,
    pub code: &'static str,
    pub converted: f64,
    pub formatted: String,
}

/// GET /api/currency
pub async fn current_currency(State(state): State<AppState>) -> Json<Resolution> {
    Json(state.currency.resolve_on_load().await)
}

/// POST /api/currency
pub async fn set_currency(
    State(state): State<AppState>,
    payload: Result<Json<SetCurrencyRequest>, JsonRejection>,
) -> Result<Json<Resolution>, ApiError> {
    let Json(request) = payload?;
    let country_code = request
        .country_code
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required field: countryCode"))?;
    Ok(Json(state.currency.set_country(&country_code).await))
}

/// POST /api/currency/detect
pub async fn detect_currency(
    State(state): State<AppState>,
    payload: Result<Json<DetectRequest>, JsonRejection>,
) -> Result<Json<Resolution>, ApiError> {
    let Json(request) = payload?;
    let (Some(lat), Some(lng)) = (request.lat, request.lng) else {
        return Err(ApiError::bad_request("Both lat and lng are required"));
    };
    let location = valid_coordinate(Coordinate::new(lat, lng))?;
    Ok(Json(
        state
            .currency
            .detect_from_coordinates(location.lat, location.lng)
            .await,
    ))
}

/// GET /api/currency/supported
pub async fn supported_currencies() -> Json<SupportedResponse> {
    Json(SupportedResponse {
        currencies: CURRENCIES,
    })
}

/// GET /api/currency/convert?amount=&code=
pub async fn convert_amount(
    State(state): State<AppState>,
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let Query(query) = query?;
    let amount = query
        .amount
        .filter(|a| a.is_finite())
        .ok_or_else(|| ApiError::bad_request("A finite amount is required"))?;

    let config = match query.code.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(code) => by_currency_code(code)
            .ok_or_else(|| ApiError::bad_request(format!("Unsupported currency: {}", code)))?,
        None => state.currency.cached().await.unwrap_or_else(default_currency),
    };

    let converted = convert(amount, config.code);
    Ok(Json(ConvertResponse {
        amount,
        code: config.code,
        converted,
        formatted: format(converted, config),
    }))
}
