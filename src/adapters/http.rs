//! Thin `reqwest` wrapper shared by every provider.
//!
//! Providers only ever issue a single GET per operation; timeout and user
//! agent are the only knobs, retries are left to the HTTP library.

use crate::utils::error::{GeocoderError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("geocoder/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientConfig {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Status and body of a provider response, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decodes the body. Empty or non-JSON bodies are invalid server responses.
    pub fn json(&self) -> Result<serde_json::Value> {
        if self.body.trim().is_empty() {
            return Err(GeocoderError::invalid_response(
                "Invalid server response: empty body",
            ));
        }

        serde_json::from_str(&self.body).map_err(|e| {
            GeocoderError::invalid_response(format!("Invalid server response: {}", e))
        })
    }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }

    pub async fn get(&self, url: Url) -> Result<RawResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("Provider responded with status {} ({} bytes)", status, body.len());
        Ok(RawResponse { status, body })
    }
}
