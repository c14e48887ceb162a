//! MapQuest Geocoding API v1. Geocode and reverse only, resolved down to the
//! street.

pub mod command;
pub mod transformer;

use crate::adapters::http::HttpClient;
use crate::core::command::execute;
use crate::domain::model::{Accuracy, Location};
use crate::domain::ports::Provider;
use crate::domain::query::{GeocodeQuery, ReverseQuery};
use crate::utils::error::Result;
use async_trait::async_trait;
use command::{MapQuestGeocodeCommand, MapQuestReverseCommand};
use url::Url;

pub const MAP_QUEST_PROVIDER_NAME: &str = "map_quest";
pub const DEFAULT_BASE_URL: &str = "https://www.mapquestapi.com";

pub const GEOCODE_PATH: &str = "/geocoding/v1/address";
pub const REVERSE_PATH: &str = "/geocoding/v1/reverse";

#[derive(Debug, Clone)]
pub struct MapQuestContext {
    base_url: String,
    api_key: String,
}

impl MapQuestContext {
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url.trim_end_matches('/'), path))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

pub struct MapQuestProvider {
    client: HttpClient,
    geocode: MapQuestGeocodeCommand,
    reverse: MapQuestReverseCommand,
}

impl MapQuestProvider {
    pub fn new(client: HttpClient, api_key: impl Into<String>) -> Self {
        Self::from_context(
            client,
            MapQuestContext {
                base_url: DEFAULT_BASE_URL.to_string(),
                api_key: api_key.into(),
            },
        )
    }

    #[must_use]
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        let context = MapQuestContext {
            base_url: base_url.into(),
            ..self.geocode.context().clone()
        };
        Self::from_context(self.client, context)
    }

    fn from_context(client: HttpClient, context: MapQuestContext) -> Self {
        Self {
            client,
            geocode: MapQuestGeocodeCommand::new(context.clone()),
            reverse: MapQuestReverseCommand::new(context),
        }
    }
}

#[async_trait]
impl Provider for MapQuestProvider {
    fn name(&self) -> &str {
        MAP_QUEST_PROVIDER_NAME
    }

    fn max_accuracy(&self) -> Accuracy {
        Accuracy::StreetName
    }

    async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<Location>> {
        execute(&self.client, &self.geocode, query).await
    }

    async fn reverse(&self, query: &ReverseQuery) -> Result<Vec<Location>> {
        execute(&self.client, &self.reverse, query).await
    }
}
