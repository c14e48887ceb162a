//! HERE Geocoder API 6.2 plus the Geocoder Autocomplete API.
//!
//! Geocode, reverse and autocomplete live on three different hosts.

pub mod command;
pub mod transformer;

use crate::adapters::http::HttpClient;
use crate::core::command::execute;
use crate::domain::model::{Accuracy, Location, Suggestion};
use crate::domain::ports::Provider;
use crate::domain::query::{GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery};
use crate::utils::error::Result;
use async_trait::async_trait;
use command::{HereGeocodeCommand, HerePlaceDetailsCommand, HereReverseCommand, HereSuggestCommand};
use url::Url;

pub const HERE_PROVIDER_NAME: &str = "here";

pub const GEOCODE_BASE_URL: &str = "https://geocoder.api.here.com";
pub const REVERSE_BASE_URL: &str = "https://reverse.geocoder.api.here.com";
pub const AUTOCOMPLETE_BASE_URL: &str = "https://autocomplete.geocoder.api.here.com";

pub const GEOCODE_PATH: &str = "/6.2/geocode.json";
pub const REVERSE_PATH: &str = "/6.2/reversegeocode.json";
pub const SUGGEST_PATH: &str = "/6.2/suggest.json";

/// Search radius for reverse geocoding, in meters.
pub const REVERSE_RADIUS: u32 = 250;

#[derive(Debug, Clone)]
pub struct HereContext {
    geocode_base_url: String,
    reverse_base_url: String,
    autocomplete_base_url: String,
    app_id: String,
    app_code: String,
}

impl HereContext {
    fn url(&self, base_url: &str, path: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", base_url.trim_end_matches('/'), path))?;
        url.query_pairs_mut()
            .append_pair("app_id", &self.app_id)
            .append_pair("app_code", &self.app_code);
        Ok(url)
    }

    pub fn geocode_url(&self) -> Result<Url> {
        self.url(&self.geocode_base_url, GEOCODE_PATH)
    }

    pub fn reverse_url(&self) -> Result<Url> {
        self.url(&self.reverse_base_url, REVERSE_PATH)
    }

    pub fn suggest_url(&self) -> Result<Url> {
        self.url(&self.autocomplete_base_url, SUGGEST_PATH)
    }
}

pub struct HereProvider {
    client: HttpClient,
    geocode: HereGeocodeCommand,
    reverse: HereReverseCommand,
    suggest: HereSuggestCommand,
    place_details: HerePlaceDetailsCommand,
}

impl HereProvider {
    pub fn new(client: HttpClient, app_id: impl Into<String>, app_code: impl Into<String>) -> Self {
        Self::from_context(
            client,
            HereContext {
                geocode_base_url: GEOCODE_BASE_URL.to_string(),
                reverse_base_url: REVERSE_BASE_URL.to_string(),
                autocomplete_base_url: AUTOCOMPLETE_BASE_URL.to_string(),
                app_id: app_id.into(),
                app_code: app_code.into(),
            },
        )
    }

    /// Serves all three APIs from `base_url`.
    #[must_use]
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let context = HereContext {
            geocode_base_url: base_url.clone(),
            reverse_base_url: base_url.clone(),
            autocomplete_base_url: base_url,
            ..self.geocode.context().clone()
        };
        Self::from_context(self.client, context)
    }

    fn from_context(client: HttpClient, context: HereContext) -> Self {
        Self {
            client,
            geocode: HereGeocodeCommand::new(context.clone()),
            reverse: HereReverseCommand::new(context.clone()),
            suggest: HereSuggestCommand::new(context.clone()),
            place_details: HerePlaceDetailsCommand::new(context),
        }
    }
}

#[async_trait]
impl Provider for HereProvider {
    fn name(&self) -> &str {
        HERE_PROVIDER_NAME
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
}
