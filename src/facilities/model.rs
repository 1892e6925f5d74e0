//! Normalized facility records.

use serde::{Deserialize, Serialize};

/// WGS84 point as sent by the map UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Which provider produced a facility record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilitySource {
    OpenStreetMap,
    GooglePlaces,
}

/// Where a record came from, in the provider's own terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub source: FacilitySource,
    pub source_id: String,
    pub source_type: String,
}

/// A hospital or clinic, whichever provider it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: String,
    /// Source-specific type tag (`node`/`way`/`relation`, or `place`).
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    pub emergency: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wheelchair: Option<bool>,
    pub provenance: Provenance,
}

/// Facilities from one provider query plus an optional failure note.
///
/// Provider failures never escape as errors: callers always receive a list,
/// empty when the query failed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FacilitySearch {
    pub facilities: Vec<Facility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FacilitySearch {
    pub fn found(facilities: Vec<Facility>) -> Self {
        Self {
            facilities,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            facilities: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
