use super::transformer::{
    GoogleMapsDistanceTransformer, GoogleMapsLocationTransformer, GoogleMapsSuggestionTransformer,
};
use super::{
    check_payload_status, items, GoogleMapsContext, AUTOCOMPLETE_PATH, DISTANCE_MATRIX_PATH,
    GEOCODE_PATH, PLACE_DETAILS_PATH,
};
use crate::core::command::{transform_all, Command};
use crate::domain::model::{DistanceDetails, Location, Suggestion};
use crate::domain::ports::Transformer;
use crate::domain::query::{
    DistanceQuery, GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery,
};
use crate::utils::error::{GeocoderError, Result};
use serde_json::Value;
use url::Url;

/// `components` filter, e.g. `country:US|postal_code:60619|locality:Chicago`.
fn components(query: &GeocodeQuery) -> Option<String> {
    let state = query.state_code.as_ref().or(query.state.as_ref());
    let parts: Vec<String> = [
        ("country", query.country_code.as_ref()),
        ("postal_code", query.postal_code.as_ref()),
        ("locality", query.city.as_ref()),
        ("administrative_area", state),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.map(|v| format!("{}:{}", name, v)))
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("|"))
    }
}

pub struct GoogleMapsGeocodeCommand {
    context: GoogleMapsContext,
}

impl GoogleMapsGeocodeCommand {
    pub fn new(context: GoogleMapsContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &GoogleMapsContext {
        &self.context
    }
}

impl Command for GoogleMapsGeocodeCommand {
    type Query = GeocodeQuery;
    type Output = Vec<Location>;

    fn url(&self, query: &GeocodeQuery) -> Result<Url> {
        let mut url = self.context.endpoint(GEOCODE_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("address", &query.address);
            if let Some(components) = components(query) {
                pairs.append_pair("components", &components);
            }
            pairs.append_pair("language", &query.language);
            if let Some(cc) = &query.country_code {
                pairs.append_pair("region", &cc.to_lowercase());
            }
            pairs.append_pair("key", self.context.api_key());
        }
        self.context.sign(&mut url)?;
        Ok(url)
    }

    fn parse(&self, body: Value, _query: &GeocodeQuery) -> Result<Vec<Location>> {
        check_payload_status(&body)?;
        transform_all(&GoogleMapsLocationTransformer, items(&body, "results"))
    }
}

pub struct GoogleMapsReverseCommand {
    context: GoogleMapsContext,
}

impl GoogleMapsReverseCommand {
    pub fn new(context: GoogleMapsContext) -> Self {
        Self { context }
    }
}

impl Command for GoogleMapsReverseCommand {
    type Query = ReverseQuery;
    type Output = Vec<Location>;

    fn url(&self, query: &ReverseQuery) -> Result<Url> {
        let mut url = self.context.endpoint(GEOCODE_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("latlng", &query.coordinates().to_string());
            pairs.append_pair("language", &query.language);
            if let Some(cc) = &query.country_code {
                pairs.append_pair("region", &cc.to_lowercase());
            }
            pairs.append_pair("key", self.context.api_key());
        }
        self.context.sign(&mut url)?;
        Ok(url)
    }

    fn parse(&self, body: Value, _query: &ReverseQuery) -> Result<Vec<Location>> {
        check_payload_status(&body)?;
        transform_all(&GoogleMapsLocationTransformer, items(&body, "results"))
    }
}

pub struct GoogleMapsSuggestCommand {
    context: GoogleMapsContext,
}

impl GoogleMapsSuggestCommand {
    pub fn new(context: GoogleMapsContext) -> Self {
        Self { context }
    }
}

impl Command for GoogleMapsSuggestCommand {
    type Query = SuggestQuery;
    type Output = Vec<Suggestion>;

    fn url(&self, query: &SuggestQuery) -> Result<Url> {
        let mut url = self.context.endpoint(AUTOCOMPLETE_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("input", &query.address);
            pairs.append_pair("language", &query.language);
            if let Some(cc) = &query.country_code {
                pairs.append_pair("components", &format!("country:{}", cc.to_lowercase()));
            }
            if let Some(location) = query.coordinates() {
                pairs.append_pair("location", &location.to_string());
            }
            if let Some(radius) = query.radius {
                pairs.append_pair("radius", &radius.to_string());
            }
            pairs.append_pair("key", self.context.api_key());
        }
        Ok(url)
    }

    fn parse(&self, body: Value, _query: &SuggestQuery) -> Result<Vec<Suggestion>> {
        check_payload_status(&body)?;
        transform_all(&GoogleMapsSuggestionTransformer, items(&body, "predictions"))
    }
}

pub struct GoogleMapsPlaceDetailsCommand {
    context: GoogleMapsContext,
}

impl GoogleMapsPlaceDetailsCommand {
    pub fn new(context: GoogleMapsContext) -> Self {
        Self { context }
    }
}

impl Command for GoogleMapsPlaceDetailsCommand {
    type Query = PlaceDetailsQuery;
    type Output = Location;

    fn url(&self, query: &PlaceDetailsQuery) -> Result<Url> {
        let mut url = self.context.endpoint(PLACE_DETAILS_PATH)?;
        url.query_pairs_mut()
            .append_pair("placeid", &query.place_id)
            .append_pair("language", &query.language)
            .append_pair("key", self.context.api_key());
        Ok(url)
    }

    fn parse(&self, body: Value, query: &PlaceDetailsQuery) -> Result<Location> {
        let not_found = || GeocoderError::PlaceNotFound {
            place_id: query.place_id.clone(),
        };

        match body.get("status").and_then(Value::as_str) {
            Some("NOT_FOUND") | Some("ZERO_RESULTS") => return Err(not_found()),
            _ => check_payload_status(&body)?,
        }

        let result = body.get("result").ok_or_else(not_found)?;
        GoogleMapsLocationTransformer.transform(result)
    }
}

pub struct GoogleMapsDistanceCommand {
    context: GoogleMapsContext,
}

impl GoogleMapsDistanceCommand {
    pub fn new(context: GoogleMapsContext) -> Self {
        Self { context }
    }
}

impl Command for GoogleMapsDistanceCommand {
    type Query = DistanceQuery;
    type Output = DistanceDetails;

    fn url(&self, query: &DistanceQuery) -> Result<Url> {
        let mut url = self.context.endpoint(DISTANCE_MATRIX_PATH)?;
        url.query_pairs_mut()
            .append_pair("origins", &query.from.to_string())
            .append_pair("destinations", &query.to.to_string())
            .append_pair("mode", query.mode.as_str())
            .append_pair("key", self.context.api_key());
        Ok(url)
    }

    fn parse(&self, body: Value, query: &DistanceQuery) -> Result<DistanceDetails> {
        check_payload_status(&body)?;

        let element = body
            .pointer("/rows/0/elements/0")
            .ok_or_else(|| GeocoderError::invalid_response("Invalid server response: no route"))?;

        match element.get("status").and_then(Value::as_str) {
            None | Some("OK") => {}
            Some(status) => {
                return Err(GeocoderError::invalid_response(format!(
                    "No {} route from {} to {} ({})",
                    query.mode.as_str(),
                    query.from,
                    query.to,
                    status
                )))
            }
        }

        GoogleMapsDistanceTransformer::new(query.mode).transform(element)
    }
}
