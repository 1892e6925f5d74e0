use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use super::api_types::ApiError;
use super::helpers::created;
use crate::models::NewReview;
use crate::server::AppState;

/// POST /api/reviews
pub async fn create_review(
    State(state): State<AppState>,
    payload: Result<Json<NewReview>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let review = request.into_review(state.ids.next_id("rev"), Utc::now())?;
    tracing::info!(id = %review.id, rating = review.rating, "Review submitted");
    Ok(created(review))
}
