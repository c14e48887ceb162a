use super::transformer::{HereLocationTransformer, HereSuggestionTransformer};
use super::{HereContext, REVERSE_RADIUS};
use crate::core::command::{transform_all, Command};
use crate::domain::model::{Location, Suggestion};
use crate::domain::ports::Transformer;
use crate::domain::query::{GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery};
use crate::utils::error::{GeocoderError, Result};
use serde_json::Value;
use url::Url;

/// Asks HERE for the two-letter country code alongside the three-letter one.
const ADDITIONAL_DATA: &str = "Country2,true";

/// `Response.View[0].Result[*].Location`; anything missing means no results.
fn locations(body: &Value) -> Vec<&Value> {
    body.pointer("/Response/View/0/Result")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .filter_map(|result| result.get("Location"))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_locations(body: &Value) -> Result<Vec<Location>> {
    locations(body)
        .into_iter()
        .map(|location| HereLocationTransformer.transform(location))
        .collect()
}

pub struct HereGeocodeCommand {
    context: HereContext,
}

impl HereGeocodeCommand {
    pub fn new(context: HereContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &HereContext {
        &self.context
    }
}

impl Command for HereGeocodeCommand {
    type Query = GeocodeQuery;
    type Output = Vec<Location>;

    fn url(&self, query: &GeocodeQuery) -> Result<Url> {
        let mut url = self.context.geocode_url()?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("searchtext", &query.address);
            if let Some(country) = &query.country_code {
                pairs.append_pair("country", country);
            }
            if let Some(state) = query.state.as_ref().or(query.state_code.as_ref()) {
                pairs.append_pair("state", state);
            }
            if let Some(city) = &query.city {
                pairs.append_pair("city", city);
            }
            if let Some(postal_code) = &query.postal_code {
                pairs.append_pair("postalcode", postal_code);
            }
            pairs.append_pair("maxresults", &query.limit.to_string());
            pairs.append_pair("language", &query.language);
            pairs.append_pair("additionaldata", ADDITIONAL_DATA);
        }
        Ok(url)
    }

    fn parse(&self, body: Value, _query: &GeocodeQuery) -> Result<Vec<Location>> {
        parse_locations(&body)
    }
}

pub struct HereReverseCommand {
    context: HereContext,
}

impl HereReverseCommand {
    pub fn new(context: HereContext) -> Self {
        Self { context }
    }
}

impl Command for HereReverseCommand {
    type Query = ReverseQuery;
    type Output = Vec<Location>;

    fn url(&self, query: &ReverseQuery) -> Result<Url> {
        let mut url = self.context.reverse_url()?;
        url.query_pairs_mut()
            .append_pair(
                "prox",
                &format!("{},{}", query.coordinates(), REVERSE_RADIUS),
            )
            .append_pair("mode", "retrieveAddresses")
            .append_pair("maxresults", &query.limit.to_string())
            .append_pair("language", &query.language)
            .append_pair("additionaldata", ADDITIONAL_DATA);
        Ok(url)
    }

    fn parse(&self, body: Value, _query: &ReverseQuery) -> Result<Vec<Location>> {
        parse_locations(&body)
    }
}

pub struct HereSuggestCommand {
    context: HereContext,
}

impl HereSuggestCommand {
    pub fn new(context: HereContext) -> Self {
        Self { context }
    }
}

impl Command for HereSuggestCommand {
    type Query = SuggestQuery;
    type Output = Vec<Suggestion>;

    fn url(&self, query: &SuggestQuery) -> Result<Url> {
        let mut url = self.context.suggest_url()?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", &query.address);
            pairs.append_pair("maxresults", &query.limit.to_string());
            pairs.append_pair("language", &query.language);
            if let Some(country) = &query.country_code {
                pairs.append_pair("country", country);
            }
            if let Some(center) = query.coordinates() {
                let prox = match query.radius {
                    Some(radius) => format!("{},{}", center, radius),
                    None => center.to_string(),
                };
                pairs.append_pair("prox", &prox);
            }
        }
        Ok(url)
    }

    fn parse(&self, body: Value, _query: &SuggestQuery) -> Result<Vec<Suggestion>> {
        let suggestions = body
            .get("suggestions")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        transform_all(&HereSuggestionTransformer, suggestions)
    }
}

pub struct HerePlaceDetailsCommand {
    context: HereContext,
}

impl HerePlaceDetailsCommand {
    pub fn new(context: HereContext) -> Self {
        Self { context }
    }
}

impl Command for HerePlaceDetailsCommand {
    type Query = PlaceDetailsQuery;
    type Output = Location;

    fn url(&self, query: &PlaceDetailsQuery) -> Result<Url> {
        let mut url = self.context.geocode_url()?;
        url.query_pairs_mut()
            .append_pair("locationid", &query.place_id)
            .append_pair("language", &query.language)
            .append_pair("additionaldata", ADDITIONAL_DATA);
        Ok(url)
    }

    fn parse(&self, body: Value, query: &PlaceDetailsQuery) -> Result<Location> {
        parse_locations(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| GeocoderError::PlaceNotFound {
                place_id: query.place_id.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> HereContext {
        HereContext {
            geocode_base_url: "https://geocoder.api.here.com".to_string(),
            reverse_base_url: "https://reverse.geocoder.api.here.com".to_string(),
            autocomplete_base_url: "https://autocomplete.geocoder.api.here.com".to_string(),
            app_id: "id".to_string(),
            app_code: "code".to_string(),
        }
    }

    fn params(url: &Url) -> Vec<(String, String)> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_geocode_url() {
        let query = GeocodeQuery::new("1158 E 89th St")
            .with_country_code("US")
            .with_city("Chicago")
            .with_limit(3);

        let url = HereGeocodeCommand::new(context()).url(&query).unwrap();
        let params = params(&url);

        assert_eq!(url.host_str(), Some("geocoder.api.here.com"));
        assert_eq!(url.path(), "/6.2/geocode.json");
        assert_eq!(params[0], ("app_id".to_string(), "id".to_string()));
        assert_eq!(params[1], ("app_code".to_string(), "code".to_string()));
        assert!(params.contains(&("searchtext".to_string(), "1158 E 89th St".to_string())));
        assert!(params.contains(&("maxresults".to_string(), "3".to_string())));
        assert!(params.contains(&("additionaldata".to_string(), "Country2,true".to_string())));
    }

    #[test]
    fn test_reverse_url_uses_proximity() {
        let url = HereReverseCommand::new(context())
            .url(&ReverseQuery::new(41.7340186, -87.5960762))
            .unwrap();
        let params = params(&url);

        assert_eq!(url.host_str(), Some("reverse.geocoder.api.here.com"));
        assert!(params.contains(&("prox".to_string(), "41.7340186,-87.5960762,250".to_string())));
        assert!(params.contains(&("mode".to_string(), "retrieveAddresses".to_string())));
    }

    #[test]
    fn test_suggest_url() {
        let query = SuggestQuery::new("1158 E 89th")
            .with_location(41.7340186, -87.5960762)
            .with_radius(25000);

        let url = HereSuggestCommand::new(context()).url(&query).unwrap();

        assert_eq!(url.host_str(), Some("autocomplete.geocoder.api.here.com"));
        assert!(params(&url)
            .contains(&("prox".to_string(), "41.7340186,-87.5960762,25000".to_string())));
    }

    #[test]
    fn test_empty_shapes_mean_no_results() {
        let command = HereGeocodeCommand::new(context());
        let query = GeocodeQuery::new("x");

        for body in [
            json!({}),
            json!({"Response": {"View": []}}),
            json!({"Response": {"View": [{"Result": []}]}}),
        ] {
            assert!(command.parse(body, &query).unwrap().is_empty());
        }

        let suggest = HereSuggestCommand::new(context());
        assert!(suggest
            .parse(json!({}), &SuggestQuery::new("x"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_place_details_not_found() {
        let command = HerePlaceDetailsCommand::new(context());
        let err = command
            .parse(json!({"Response": {"View": []}}), &PlaceDetailsQuery::new("NT_missing"))
            .unwrap_err();

        assert!(matches!(err, GeocoderError::PlaceNotFound { .. }));
    }
}
