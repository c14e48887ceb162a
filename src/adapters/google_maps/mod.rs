//! Google Maps Platform: Geocoding, Places Autocomplete, Place Details and
//! Distance Matrix.
//!
//! Google answers most failures with HTTP 200 and a `status` field in the
//! payload, so every command checks the payload on top of the HTTP status.

pub mod command;
pub mod transformer;

use crate::adapters::http::HttpClient;
use crate::core::command::{execute, INVALID_CREDENTIALS_MESSAGE, QUOTA_EXCEEDED_MESSAGE};
use crate::domain::model::{Accuracy, DistanceDetails, Location, Suggestion};
use crate::domain::ports::Provider;
use crate::domain::query::{
    DistanceQuery, GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery,
};
use crate::utils::error::{GeocoderError, Result};
use crate::utils::url_signing::sign_url;
use async_trait::async_trait;
use command::{
    GoogleMapsDistanceCommand, GoogleMapsGeocodeCommand, GoogleMapsPlaceDetailsCommand,
    GoogleMapsReverseCommand, GoogleMapsSuggestCommand,
};
use serde_json::Value;
use url::Url;

pub const GOOGLE_MAPS_PROVIDER_NAME: &str = "google_maps";
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

pub const GEOCODE_PATH: &str = "/maps/api/geocode/json";
pub const AUTOCOMPLETE_PATH: &str = "/maps/api/place/autocomplete/json";
pub const PLACE_DETAILS_PATH: &str = "/maps/api/place/details/json";
pub const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";

/// Credentials and base URL shared by every Google command.
#[derive(Debug, Clone)]
pub struct GoogleMapsContext {
    base_url: String,
    api_key: String,
    /// URL-signing secret (digital signature), optional.
    secret: Option<String>,
}

impl GoogleMapsContext {
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            path
        ))?)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Signs the URL when a secret is configured. Call after every parameter is set.
    pub fn sign(&self, url: &mut Url) -> Result<()> {
        match &self.secret {
            Some(secret) => sign_url(url, secret),
            None => Ok(()),
        }
    }
}

pub struct GoogleMapsProvider {
    client: HttpClient,
    geocode: GoogleMapsGeocodeCommand,
    reverse: GoogleMapsReverseCommand,
    suggest: GoogleMapsSuggestCommand,
    place_details: GoogleMapsPlaceDetailsCommand,
    distance: GoogleMapsDistanceCommand,
}

impl GoogleMapsProvider {
    pub fn new(client: HttpClient, api_key: impl Into<String>) -> Self {
        Self::from_context(
            client,
            GoogleMapsContext {
                base_url: DEFAULT_BASE_URL.to_string(),
                api_key: api_key.into(),
                secret: None,
            },
        )
    }

    pub fn with_secret(
        client: HttpClient,
        api_key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self::from_context(
            client,
            GoogleMapsContext {
                base_url: DEFAULT_BASE_URL.to_string(),
                api_key: api_key.into(),
                secret: Some(secret.into()),
            },
        )
    }

    /// Points every command at `base_url` (proxies, mock servers).
    #[must_use]
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        let context = GoogleMapsContext {
            base_url: base_url.into(),
            ..self.geocode.context().clone()
        };
        Self::from_context(self.client, context)
    }

    fn from_context(client: HttpClient, context: GoogleMapsContext) -> Self {
        Self {
            client,
            geocode: GoogleMapsGeocodeCommand::new(context.clone()),
            reverse: GoogleMapsReverseCommand::new(context.clone()),
            suggest: GoogleMapsSuggestCommand::new(context.clone()),
            place_details: GoogleMapsPlaceDetailsCommand::new(context.clone()),
            distance: GoogleMapsDistanceCommand::new(context),
        }
    }
}

#[async_trait]
impl Provider for GoogleMapsProvider {
    fn name(&self) -> &str {
        GOOGLE_MAPS_PROVIDER_NAME
    }

    fn max_accuracy(&self) -> Accuracy {
        Accuracy::HouseNumber
    }

    async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<Location>> {
        execute(&self.client, &self.geocode, query).await
    }

    async fn reverse(&self, query: &ReverseQuery) -> Result<Vec<Location>> {
        execute(&self.client, &self.reverse, query).await
    }

    async fn suggest(&self, query: &SuggestQuery) -> Result<Vec<Suggestion>> {
        execute(&self.client, &self.suggest, query).await
    }

    async fn place_details(&self, query: &PlaceDetailsQuery) -> Result<Location> {
        execute(&self.client, &self.place_details, query).await
    }

    async fn distance(&self, query: &DistanceQuery) -> Result<DistanceDetails> {
        execute(&self.client, &self.distance, query).await
    }
}

/// Maps the payload `status` of an HTTP 200 answer to the error taxonomy.
pub fn check_payload_status(body: &Value) -> Result<()> {
    let status = body.get("status").and_then(Value::as_str);
    let message = body.get("error_message").and_then(Value::as_str);

    match status {
        None | Some("OK") | Some("ZERO_RESULTS") => Ok(()),
        Some("REQUEST_DENIED") => match message {
            Some(m) if is_invalid_key_message(m) => Err(GeocoderError::InvalidCredentials(
                INVALID_CREDENTIALS_MESSAGE.to_string(),
            )),
            Some(m) => Err(GeocoderError::invalid_response(m)),
            None => Err(GeocoderError::invalid_response(
                "Invalid server response: request denied",
            )),
        },
        Some("OVER_QUERY_LIMIT") | Some("OVER_DAILY_LIMIT") => Err(GeocoderError::QuotaExceeded(
            message.unwrap_or(QUOTA_EXCEEDED_MESSAGE).to_string(),
        )),
        Some(other) => Err(GeocoderError::invalid_response(match message {
            Some(m) => m.to_string(),
            None => format!("Invalid server response: {}", other),
        })),
    }
}

fn is_invalid_key_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("api key") && lower.contains("invalid")
}

/// `results`/`predictions` style arrays; a missing key means no results.
pub fn items<'a>(body: &'a Value, key: &str) -> &'a [Value] {
    body.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
