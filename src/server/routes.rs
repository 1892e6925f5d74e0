//! Router configuration for the API server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Marketplace records
        .route(
            "/api/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route("/api/services", get(handlers::list_services))
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/emergency", post(handlers::create_emergency))
        .route("/api/reviews", post(handlers::create_review))
        // Facility lookup
        .route("/api/hospitals/nearby", post(handlers::nearby_hospitals))
        .route("/api/hospitals/details", post(handlers::hospital_details))
        .route(
            "/api/hospitals/osm-nearby",
            post(handlers::osm_nearby_hospitals),
        )
        // Display currency
        .route(
            "/api/currency",
            get(handlers::current_currency).post(handlers::set_currency),
        )
        .route("/api/currency/detect", post(handlers::detect_currency))
        .route(
            "/api/currency/supported",
            get(handlers::supported_currencies),
        )
        .route("/api/currency/convert", get(handlers::convert_amount))
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
