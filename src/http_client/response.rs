//! Response decoding for provider calls.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, ProviderResult};

/// Decode a provider response body as JSON, rejecting non-2xx statuses.
pub async fn decode_json<T: DeserializeOwned>(response: Response) -> ProviderResult<T> {
    let status = response.status();
    let body = response.text().await?;
    parse_json_body(status, &body)
}

/// Parse an already-read body. Split out so status handling is testable
/// without a live connection.
pub fn parse_json_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> ProviderResult<T> {
    if !status.is_success() {
        return Err(ProviderError::HttpStatus(status.as_u16()));
    }
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(120).collect();
        ProviderError::Malformed(format!("{} (body starts with {:?})", e, preview))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        status: String,
    }

    #[test]
    fn test_parse_ok_body() {
        let probe: Probe = parse_json_body(StatusCode::OK, r#"{"status":"OK"}"#).unwrap();
        assert_eq!(probe.status, "OK");
    }

    #[test]
    fn test_parse_rejects_http_error() {
        let err = parse_json_body::<Probe>(StatusCode::TOO_MANY_REQUESTS, "{}").unwrap_err();
        assert!(matches!(err, ProviderError::HttpStatus(429)));
    }

    #[test]
    fn test_parse_rejects_html() {
        let err = parse_json_body::<Probe>(StatusCode::OK, "<html>busy</html>").unwrap_err();
        match err {
            ProviderError::Malformed(msg) => assert!(msg.contains("<html>")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
