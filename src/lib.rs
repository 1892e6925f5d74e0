//! CareLink - API layer for a healthcare services marketplace.
//!
//! Serves the marketplace's mock booking endpoints and two real flows:
//! currency localization (cached preference, IP or coordinate detection,
//! static fallback) and nearby facility lookup against Google Places and
//! OpenStreetMap's Overpass API.

pub mod cli;
pub mod config;
pub mod currency;
pub mod error;
pub mod facilities;
pub mod http_client;
pub mod ids;
pub mod models;
pub mod server;

pub use error::ProviderError;
