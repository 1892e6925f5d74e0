use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use super::api_types::ApiError;
use super::helpers::created;
use crate::models::NewEmergencyRequest;
use crate::server::AppState;

/// POST /api/emergency
pub async fn create_emergency(
    State(state): State<AppState>,
    payload: Result<Json<NewEmergencyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let emergency = request.dispatch(state.ids.next_id("emg"), Utc::now())?;
    tracing::warn!(
        id = %emergency.id,
        kind = %emergency.kind,
        "Emergency request dispatched"
    );
    Ok(created(emergency))
}
