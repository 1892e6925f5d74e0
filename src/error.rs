//! Error types shared by the third-party provider clients.

use thiserror::Error;

/// Failure talking to a third-party geodata or geolocation provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a usable HTTP response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The provider answered with a non-success HTTP status.
    #[error("Provider returned HTTP {0}")]
    HttpStatus(u16),
    /// The body was not the JSON shape we expected.
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// The provider answered but reported an error status in its payload.
    #[error("{provider} API error: {status}")]
    Status { provider: &'static str, status: String },
    /// A required setting (API key, endpoint) is absent.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Malformed(e.to_string())
    }
}

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;
