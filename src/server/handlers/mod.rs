//! HTTP request handlers for the API server.

mod api_types;
mod appointments;
mod auth;
mod currency;
mod emergency;
mod health;
mod helpers;
mod hospitals;
mod reviews;
mod services;

pub use api_types::{panic_response, ApiError, INTERNAL_ERROR_MESSAGE};
pub use appointments::{create_appointment, list_appointments};
pub use auth::signup;
pub use currency::{
    convert_amount, current_currency, detect_currency, set_currency, supported_currencies,
};
pub use emergency::create_emergency;
pub use health::health;
pub use hospitals::{
    hospital_details, nearby_hospitals, osm_nearby_hospitals, MISSING_API_KEY_MESSAGE,
};
pub use reviews::create_review;
pub use services::list_services;
