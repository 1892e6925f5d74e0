use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Serialize;

use super::api_types::ApiError;
use super::helpers::created;
use crate::models::{SignupRequest, UserSummary};
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: UserSummary,
}

/// POST /api/auth/signup
///
/// Validates and hashes but stores nothing, so the hash is dropped here.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let salt = state.ids.next_id("salt");
    let id = state.ids.next_id("usr");
    let (user, _hash) =
        tokio::task::spawn_blocking(move || request.register(id, &salt, Utc::now()))
            .await
            .map_err(ApiError::internal)??;
    tracing::info!(id = %user.id, role = ?user.role, "User signed up");
    Ok(created(SignupResponse {
        message: "User created successfully",
        user,
    }))
}
