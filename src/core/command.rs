use crate::adapters::http::{HttpClient, RawResponse};
use crate::domain::ports::Transformer;
use crate::utils::error::{GeocoderError, Result};
use reqwest::StatusCode;
use url::Url;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "API key is invalid";
pub const QUOTA_EXCEEDED_MESSAGE: &str = "Quota exceeded";

/// Query parameters never written to logs.
const SECRET_PARAMS: &[&str] = &["key", "app_id", "app_code", "signature", "token"];

/// One operation of one provider: request building plus response parsing.
pub trait Command: Send + Sync {
    type Query: Sync;
    type Output: Send;

    /// Full request URL, credentials included.
    fn url(&self, query: &Self::Query) -> Result<Url>;

    /// Maps the HTTP status to the error taxonomy before the body is read.
    fn check_response(&self, response: &RawResponse) -> Result<()> {
        check_status(response.status)
    }

    fn parse(&self, body: serde_json::Value, query: &Self::Query) -> Result<Self::Output>;
}

pub fn check_status(status: StatusCode) -> Result<()> {
    match status.as_u16() {
        200..=299 => Ok(()),
        401 | 403 => Err(GeocoderError::InvalidCredentials(
            INVALID_CREDENTIALS_MESSAGE.to_string(),
        )),
        429 => Err(GeocoderError::QuotaExceeded(QUOTA_EXCEEDED_MESSAGE.to_string())),
        code => Err(GeocoderError::invalid_response(format!(
            "Invalid server response (status {})",
            code
        ))),
    }
}

/// Issues exactly one request for `command` and returns its parsed output.
pub async fn execute<C: Command>(
    client: &HttpClient,
    command: &C,
    query: &C::Query,
) -> Result<C::Output> {
    let url = command.url(query)?;
    tracing::debug!("Sending provider request: {}", redact(&url));

    let response = client.get(url).await?;

    if let Err(e) = command.check_response(&response) {
        tracing::warn!("Provider request failed: {}", e);
        return Err(e);
    }

    let body = response.json()?;
    command.parse(body, query)
}

/// Applies `transformer` to every item, failing on the first malformed one.
pub fn transform_all<T>(
    transformer: &impl Transformer<T>,
    items: &[serde_json::Value],
) -> Result<Vec<T>> {
    items.iter().map(|item| transformer.transform(item)).collect()
}

/// Deserializes a provider item into its typed shape.
pub fn decode<T: serde::de::DeserializeOwned>(raw: &serde_json::Value) -> Result<T> {
    serde_json::from_value(raw.clone())
        .map_err(|e| GeocoderError::invalid_response(format!("Invalid server response: {}", e)))
}

pub fn redact(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if SECRET_PARAMS.contains(&k.as_ref()) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}
