//! Thin HTTP client shared by every third-party provider.

mod response;
mod user_agent;

pub use response::{decode_json, parse_json_body};
pub use user_agent::{resolve_user_agent, USER_AGENT};

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::ProviderResult;

/// JSON-over-HTTP client with a fixed user agent.
///
/// No client-wide timeout is set: callers that need a bound pass one per
/// request, everything else relies on transport defaults.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new client.
    /// - None: Use default CareLink user agent
    /// - Some(custom): Use custom user agent string
    pub fn new(user_agent_config: Option<&str>) -> ProviderResult<Self> {
        let client = Client::builder()
            .user_agent(resolve_user_agent(user_agent_config))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// GET `url` with query parameters and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> ProviderResult<T> {
        let start = Instant::now();
        let response = self.client.get(url).query(query).send().await?;
        tracing::debug!(
            url,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "GET completed"
        );
        decode_json(response).await
    }

    /// POST a urlencoded form and decode the JSON body, bounded by `timeout`.
    pub async fn post_form_json<T: DeserializeOwned>(
        &self,
        url: &str,
        form: &[(&str, &str)],
        timeout: Duration,
    ) -> ProviderResult<T> {
        let start = Instant::now();
        let response = self
            .client
            .post(url)
            .form(form)
            .timeout(timeout)
            .send()
            .await?;
        tracing::debug!(
            url,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "POST completed"
        );
        decode_json(response).await
    }
}
