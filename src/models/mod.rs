//! Marketplace records served by the mock endpoints.
//!
//! Nothing here is persisted; each module builds records from a request body
//! and the injected id generator.

mod appointment;
mod emergency;
mod review;
mod service;
mod user;

pub use appointment::{mock_appointments, Appointment, AppointmentStatus, NewAppointment};
pub use emergency::{
    EmergencyRequest, EmergencyStatus, NewEmergencyRequest, ESTIMATED_ARRIVAL_MINUTES,
};
pub use review::{NewReview, Review};
pub use service::{catalog, PricedService, Service};
pub use user::{hash_password, SignupRequest, UserRole, UserSummary, MIN_PASSWORD_LENGTH};

/// A request body failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Trimmed, non-empty value of an optional string field.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::new(format!("Missing required field: {}", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert_eq!(required(Some(" x ".into()), "f").unwrap(), "x");
        assert_eq!(
            required(Some("   ".into()), "date").unwrap_err().0,
            "Missing required field: date"
        );
        assert!(required(None, "time").is_err());
    }
}
