//! Emergency assistance requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, ValidationError};
use crate::facilities::Coordinate;

/// Quoted arrival time for every dispatched request.
pub const ESTIMATED_ARRIVAL_MINUTES: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyStatus {
    Dispatched,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEmergencyRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: Option<Coordinate>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub status: EmergencyStatus,
    pub estimated_arrival_minutes: u32,
    pub created_at: DateTime<Utc>,
}

impl NewEmergencyRequest {
    /// A request needs a type and somewhere to send help.
    pub fn dispatch(
        self,
        id: String,
        now: DateTime<Utc>,
    ) -> Result<EmergencyRequest, ValidationError> {
        let kind = required(self.kind, "type")?;
        let address = self.address.filter(|a| !a.trim().is_empty());
        if self.location.is_none() && address.is_none() {
            return Err(ValidationError::new("Either location or address is required"));
        }
        if let Some(location) = self.location {
            if !location.is_valid() {
                return Err(ValidationError::new("Location is out of range"));
            }
        }

        Ok(EmergencyRequest {
            id,
            kind,
            location: self.location,
            address,
            status: EmergencyStatus::Dispatched,
            estimated_arrival_minutes: ESTIMATED_ARRIVAL_MINUTES,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ambulance_request_is_dispatched() {
        let req: NewEmergencyRequest = serde_json::from_value(json!({
            "type": "ambulance", "location": {"lat": 9.0, "lng": 38.7}, "address": "X"
        }))
        .unwrap();
        let out = req.dispatch("emg_1".to_string(), Utc::now()).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["status"], "dispatched");
        assert_eq!(json["type"], "ambulance");
        assert_eq!(json["estimatedArrivalMinutes"], 15);
    }

    #[test]
    fn needs_somewhere_to_go() {
        let req = NewEmergencyRequest {
            kind: Some("ambulance".into()),
            ..Default::default()
        };
        assert!(req.dispatch("emg_1".into(), Utc::now()).is_err());
    }

    #[test]
    fn rejects_impossible_location() {
        let req = NewEmergencyRequest {
            kind: Some("fire".into()),
            location: Some(Coordinate::new(123.0, 0.0)),
            address: None,
        };
        assert_eq!(
            req.dispatch("emg_1".into(), Utc::now()).unwrap_err().0,
            "Location is out of range"
        );
    }
}
