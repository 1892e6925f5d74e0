//! OpenStreetMap facilities via the Overpass API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::model::{Coordinate, Facility, FacilitySearch, FacilitySource, Provenance};
use crate::error::ProviderResult;
use crate::http_client::HttpClient;

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Search radius in meters when the caller gives none.
pub const DEFAULT_OSM_RADIUS_METERS: u32 = 15_000;

/// Server-side query timeout in seconds, embedded in the query itself.
pub const QUERY_TIMEOUT_SECS: u32 = 25;

/// Address placeholder when no address tags are present.
pub const ADDRESS_NOT_AVAILABLE: &str = "Address not available";

const AMENITIES: &[&str] = &["hospital", "clinic"];
const ELEMENT_KINDS: &[&str] = &["node", "way", "relation"];

/// Build the Overpass QL query for hospitals and clinics around a point.
///
/// `out center` makes the server attach a centroid to ways and relations so
/// nothing has to be computed locally.
pub fn build_query(location: Coordinate, radius_meters: u32) -> String {
    let mut selectors = String::new();
    for amenity in AMENITIES {
        for kind in ELEMENT_KINDS {
            selectors.push_str(&format!(
                "  {}[\"amenity\"=\"{}\"](around:{},{},{});\n",
                kind, amenity, radius_meters, location.lat, location.lng
            ));
        }
    }
    format!(
        "[out:json][timeout:{}];\n(\n{});\nout center tags;",
        QUERY_TIMEOUT_SECS, selectors
    )
}

/// Raw Overpass response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
    /// Set when the server hit its own timeout or memory limit.
    pub remark: Option<String>,
}

/// One tagged map element.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Server-computed centroid of a way or relation.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Nodes carry their own position; ways and relations use `center`.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let own = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) if self.kind == "node" => Some(Coordinate::new(lat, lon)),
            _ => None,
        };
        own.or_else(|| self.center.map(|c| Coordinate::new(c.lat, c.lon)))
    }

    /// Street + house number + city when any is present, then `addr:full`,
    /// then the placeholder.
    pub fn address(&self) -> String {
        let street_line = match (self.tag("addr:street"), self.tag("addr:housenumber")) {
            (Some(street), Some(number)) => Some(format!("{} {}", street, number)),
            (Some(street), None) => Some(street.to_string()),
            (None, Some(number)) => Some(number.to_string()),
            (None, None) => None,
        };
        let parts: Vec<String> = street_line
            .into_iter()
            .chain(self.tag("addr:city").map(str::to_string))
            .collect();

        if !parts.is_empty() {
            return parts.join(", ");
        }
        self.tag("addr:full")
            .map(str::to_string)
            .unwrap_or_else(|| ADDRESS_NOT_AVAILABLE.to_string())
    }

    /// Either tagging convention marks emergency capability.
    pub fn is_emergency(&self) -> bool {
        self.tag("emergency") == Some("yes") || self.tag("emergency:service") == Some("yes")
    }

    fn into_facility(self) -> Option<Facility> {
        let name = self.tag("name")?.to_string();
        let location = self.coordinate()?;

        Some(Facility {
            id: self.id.to_string(),
            kind: self.kind.clone(),
            address: self.address(),
            location,
            phone: self
                .tag("phone")
                .or_else(|| self.tag("contact:phone"))
                .map(str::to_string),
            website: self
                .tag("website")
                .or_else(|| self.tag("contact:website"))
                .map(str::to_string),
            opening_hours: self.tag("opening_hours").map(str::to_string),
            emergency: self.is_emergency(),
            beds: self.tag("beds").and_then(|b| b.parse().ok()),
            operator: self.tag("operator").map(str::to_string),
            wheelchair: self.tag("wheelchair").map(|w| w == "yes"),
            provenance: Provenance {
                source: FacilitySource::OpenStreetMap,
                source_id: format!("{}/{}", self.kind, self.id),
                source_type: self.tag("amenity").unwrap_or("hospital").to_string(),
            },
            name,
        })
    }
}

/// Normalize Overpass elements into facilities, preserving server order.
///
/// Unnamed elements are dropped, as are elements with no resolvable
/// coordinate (no secondary lookup is attempted).
pub fn normalize(elements: Vec<OverpassElement>) -> Vec<Facility> {
    let total = elements.len();
    let facilities: Vec<Facility> = elements
        .into_iter()
        .filter_map(OverpassElement::into_facility)
        .collect();
    tracing::debug!(
        total,
        kept = facilities.len(),
        "Normalized Overpass elements"
    );
    facilities
}

/// Runs Overpass QL queries.
#[async_trait]
pub trait OverpassApi: Send + Sync {
    async fn query(&self, ql: &str) -> ProviderResult<OverpassResponse>;
}

/// HTTP Overpass client.
pub struct OverpassClient {
    http: HttpClient,
    url: String,
    timeout: Duration,
}

impl OverpassClient {
    pub fn new(http: HttpClient, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl OverpassApi for OverpassClient {
    async fn query(&self, ql: &str) -> ProviderResult<OverpassResponse> {
        self.http
            .post_form_json(&self.url, &[("data", ql)], self.timeout)
            .await
    }
}

/// Hospitals and clinics near `location` from OpenStreetMap.
pub async fn search_nearby(
    api: &dyn OverpassApi,
    location: Coordinate,
    radius_meters: Option<u32>,
) -> FacilitySearch {
    let radius = radius_meters.unwrap_or(DEFAULT_OSM_RADIUS_METERS);
    let query = build_query(location, radius);

    match api.query(&query).await {
        Ok(response) => {
            if let Some(ref remark) = response.remark {
                tracing::warn!("Overpass remark: {}", remark);
            }
            let facilities = normalize(response.elements);
            tracing::info!(
                lat = location.lat,
                lng = location.lng,
                radius,
                count = facilities.len(),
                "OpenStreetMap facility search complete"
            );
            FacilitySearch::found(facilities)
        }
        Err(e) => {
            tracing::error!("OpenStreetMap facility search failed: {}", e);
            FacilitySearch::failed(format!("Failed to fetch hospitals from OpenStreetMap: {}", e))
        }
    }
}
