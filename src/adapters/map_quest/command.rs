use super::transformer::MapQuestLocationTransformer;
use super::{MapQuestContext, GEOCODE_PATH, REVERSE_PATH};
use crate::core::command::{transform_all, Command, INVALID_CREDENTIALS_MESSAGE};
use crate::domain::model::Location;
use crate::domain::query::{GeocodeQuery, ReverseQuery};
use crate::utils::error::{GeocoderError, Result};
use serde_json::Value;
use url::Url;

/// `info.statuscode` of an HTTP 200 answer; `0` means success.
fn check_info(body: &Value) -> Result<()> {
    let code = body.pointer("/info/statuscode").and_then(Value::as_u64);
    let message = body
        .pointer("/info/messages/0")
        .and_then(Value::as_str)
        .map(str::to_string);

    match code {
        None | Some(0) => Ok(()),
        Some(401) | Some(403) => Err(GeocoderError::InvalidCredentials(
            INVALID_CREDENTIALS_MESSAGE.to_string(),
        )),
        Some(code) => Err(GeocoderError::invalid_response(message.unwrap_or_else(
            || format!("Invalid server response (status {})", code),
        ))),
    }
}

/// `results[0].locations`; anything missing means no results.
fn locations(body: &Value) -> &[Value] {
    body.pointer("/results/0/locations")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn parse_locations(body: &Value) -> Result<Vec<Location>> {
    check_info(body)?;
    transform_all(&MapQuestLocationTransformer, locations(body))
}

pub struct MapQuestGeocodeCommand {
    context: MapQuestContext,
}

impl MapQuestGeocodeCommand {
    pub fn new(context: MapQuestContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &MapQuestContext {
        &self.context
    }
}

impl Command for MapQuestGeocodeCommand {
    type Query = GeocodeQuery;
    type Output = Vec<Location>;

    fn url(&self, query: &GeocodeQuery) -> Result<Url> {
        let mut url = self.context.endpoint(GEOCODE_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("location", &query.address);
            pairs.append_pair("maxResults", &query.limit.to_string());
            pairs.append_pair("thumbMaps", "false");
            if let Some(country) = &query.country_code {
                pairs.append_pair("country", country);
            }
            if let Some(state) = query.state_code.as_ref().or(query.state.as_ref()) {
                pairs.append_pair("state", state);
            }
            if let Some(city) = &query.city {
                pairs.append_pair("city", city);
            }
            if let Some(postal_code) = &query.postal_code {
                pairs.append_pair("postalCode", postal_code);
            }
        }
        Ok(url)
    }

    fn parse(&self, body: Value, _query: &GeocodeQuery) -> Result<Vec<Location>> {
        parse_locations(&body)
    }
}

pub struct MapQuestReverseCommand {
    context: MapQuestContext,
}

impl MapQuestReverseCommand {
    pub fn new(context: MapQuestContext) -> Self {
        Self { context }
    }
}

impl Command for MapQuestReverseCommand {
    type Query = ReverseQuery;
    type Output = Vec<Location>;

    fn url(&self, query: &ReverseQuery) -> Result<Url> {
        let mut url = self.context.endpoint(REVERSE_PATH)?;
        url.query_pairs_mut()
            .append_pair("location", &query.coordinates().to_string())
            .append_pair("maxResults", &query.limit.to_string())
            .append_pair("thumbMaps", "false");
        Ok(url)
    }

    fn parse(&self, body: Value, _query: &ReverseQuery) -> Result<Vec<Location>> {
        parse_locations(&body)
    }
}
