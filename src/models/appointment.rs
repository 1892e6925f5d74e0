//! Appointment bookings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{required, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Booking request body. Unrecognized fields are echoed back untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: Option<String>,
    pub provider_id: Option<String>,
    pub service_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub provider_id: String,
    pub service_id: String,
    pub date: String,
    pub time: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewAppointment {
    /// Validate and stamp a new pending appointment.
    pub fn into_appointment(
        self,
        id: String,
        now: DateTime<Utc>,
    ) -> Result<Appointment, ValidationError> {
        let mut extra = self.extra;
        // Server-owned fields are never taken from the request.
        for key in ["id", "status", "createdAt", "updatedAt"] {
            extra.remove(key);
        }

        Ok(Appointment {
            id,
            patient_id: required(self.patient_id, "patientId")?,
            provider_id: required(self.provider_id, "providerId")?,
            service_id: required(self.service_id, "serviceId")?,
            date: required(self.date, "date")?,
            time: required(self.time, "time")?,
            address: required(self.address, "address")?,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            status: AppointmentStatus::Pending,
            created_at: now,
            updated_at: now,
            extra,
        })
    }
}

fn fixed_time(unix_secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(unix_secs, 0).unwrap_or_default()
}

/// Sample bookings returned while there is no database behind the API.
pub fn mock_appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: "apt_1001".to_string(),
            patient_id: "pat_201".to_string(),
            provider_id: "prv_301".to_string(),
            service_id: "svc_home_nursing".to_string(),
            date: "2024-03-18".to_string(),
            time: "09:30".to_string(),
            address: "Bole Road 12, Addis Ababa".to_string(),
            notes: Some("Post-operative wound dressing".to_string()),
            status: AppointmentStatus::Confirmed,
            created_at: fixed_time(1_710_000_000),
            updated_at: fixed_time(1_710_086_400),
            extra: Map::new(),
        },
        Appointment {
            id: "apt_1002".to_string(),
            patient_id: "pat_202".to_string(),
            provider_id: "prv_305".to_string(),
            service_id: "svc_lab_sample".to_string(),
            date: "2024-03-20".to_string(),
            time: "14:00".to_string(),
            address: "Kazanchis, Addis Ababa".to_string(),
            notes: None,
            status: AppointmentStatus::Pending,
            created_at: fixed_time(1_710_172_800),
            updated_at: fixed_time(1_710_172_800),
            extra: Map::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> NewAppointment {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn valid_request_becomes_pending() {
        let now = Utc::now();
        let appt = body(json!({
            "patientId": "p1", "providerId": "d1", "serviceId": "s1",
            "date": "2024-05-01", "time": "10:00", "address": "Addis",
            "paymentMethod": "cash"
        }))
        .into_appointment("apt_1".to_string(), now)
        .unwrap();

        assert_eq!(appt.status, AppointmentStatus::Pending);
        assert_eq!(appt.created_at, now);
        let out = serde_json::to_value(&appt).unwrap();
        assert_eq!(out["paymentMethod"], "cash");
        assert_eq!(out["status"], "pending");
        assert_eq!(out["patientId"], "p1");
    }

    #[test]
    fn client_cannot_override_server_fields() {
        let appt = body(json!({
            "patientId": "p1", "providerId": "d1", "serviceId": "s1",
            "date": "2024-05-01", "time": "10:00", "address": "Addis",
            "status": "confirmed", "id": "spoofed"
        }))
        .into_appointment("apt_9".to_string(), Utc::now())
        .unwrap();

        let out = serde_json::to_value(&appt).unwrap();
        assert_eq!(out["id"], "apt_9");
        assert_eq!(out["status"], "pending");
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = body(json!({"patientId": "p1"}))
            .into_appointment("apt_1".to_string(), Utc::now())
            .unwrap_err();
        assert_eq!(err.0, "Missing required field: providerId");
    }

    #[test]
    fn mock_list_is_stable() {
        let list = mock_appointments();
        assert_eq!(list.len(), 2);
        assert_eq!(list, mock_appointments());
    }
}
