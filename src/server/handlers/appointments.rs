//! Booking endpoints. Nothing is persisted.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Serialize;

use super::api_types::ApiError;
use super::helpers::created;
use crate::models::{mock_appointments, Appointment, NewAppointment};
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct AppointmentList {
    pub appointments: Vec<Appointment>,
}

/// GET /api/appointments
pub async fn list_appointments() -> Json<AppointmentList> {
    Json(AppointmentList {
        appointments: mock_appointments(),
    })
}

/// POST /api/appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    payload: Result<Json<NewAppointment>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let appointment = request.into_appointment(state.ids.next_id("apt"), Utc::now())?;
    tracing::info!(
        id = %appointment.id,
        service = %appointment.service_id,
        "Appointment requested"
    );
    Ok(created(appointment))
}
