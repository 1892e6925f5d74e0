//! Request types and small helpers shared across handlers.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::api_types::ApiError;
use crate::facilities::Coordinate;

/// `201 Created` with a JSON body.
pub fn created<T: Serialize>(value: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(value))
}

/// Body of both nearby-search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct NearbyRequest {
    pub location: Option<Coordinate>,
    pub radius: Option<u32>,
}

impl NearbyRequest {
    /// The search centre, rejected when missing or out of range.
    pub fn location(&self) -> Result<Coordinate, ApiError> {
        let location = self
            .location
            .ok_or_else(|| ApiError::bad_request("Location is required"))?;
        valid_coordinate(location)
    }
}

pub fn valid_coordinate(location: Coordinate) -> Result<Coordinate, ApiError> {
    if location.is_valid() {
        Ok(location)
    } else {
        Err(ApiError::bad_request("Location is out of range"))
    }
}
