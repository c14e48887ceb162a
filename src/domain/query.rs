use crate::domain::model::{Accuracy, Coordinates, TravelMode};
use crate::utils::error::{GeocoderError, Result};
use crate::utils::validation::{
    validate_country_code, validate_non_empty_string, validate_optional, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RESULT_LANGUAGE: &str = "en";
pub const DEFAULT_RESULT_LIMIT: usize = 5;
pub const MAX_RESULT_LIMIT: usize = 100;

fn default_language() -> String {
    DEFAULT_RESULT_LANGUAGE.to_string()
}

const fn default_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

fn validate_common(country_code: Option<&str>, language: &str, limit: usize) -> Result<()> {
    validate_optional(country_code, |cc| validate_country_code("country_code", cc))?;
    validate_non_empty_string("language", language)?;
    validate_range("limit", limit, 1, MAX_RESULT_LIMIT)
}

fn validate_lat_lon(lat: f64, lon: f64) -> Result<()> {
    validate_range("lat", lat, -90.0, 90.0)?;
    validate_range("lon", lon, -180.0, 180.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeQuery {
    pub address: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub accuracy: Option<Accuracy>,
    /// Keep only results agreeing with the structured fields set here.
    #[serde(default)]
    pub exact_match: bool,
    /// Copy structured fields from the query into results that lack them.
    #[serde(default)]
    pub fill_missing_query_properties: bool,
    #[serde(default)]
    pub with_raw: bool,
}

impl GeocodeQuery {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            country_code: None,
            state: None,
            state_code: None,
            city: None,
            postal_code: None,
            language: default_language(),
            limit: DEFAULT_RESULT_LIMIT,
            accuracy: None,
            exact_match: false,
            fill_missing_query_properties: false,
            with_raw: false,
        }
    }

    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn with_state_code(mut self, state_code: impl Into<String>) -> Self {
        self.state_code = Some(state_code.into());
        self
    }

    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_accuracy(mut self, accuracy: Accuracy) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    #[must_use]
    pub fn with_exact_match(mut self, exact_match: bool) -> Self {
        self.exact_match = exact_match;
        self
    }

    #[must_use]
    pub fn with_fill_missing_query_properties(mut self, fill: bool) -> Self {
        self.fill_missing_query_properties = fill;
        self
    }

    #[must_use]
    pub fn with_raw(mut self, with_raw: bool) -> Self {
        self.with_raw = with_raw;
        self
    }
}

impl Validate for GeocodeQuery {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("address", &self.address)?;
        validate_common(self.country_code.as_deref(), &self.language, self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub accuracy: Option<Accuracy>,
    #[serde(default)]
    pub with_raw: bool,
}

impl ReverseQuery {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            country_code: None,
            language: default_language(),
            limit: DEFAULT_RESULT_LIMIT,
            accuracy: None,
            with_raw: false,
        }
    }

    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_accuracy(mut self, accuracy: Accuracy) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    #[must_use]
    pub fn with_raw(mut self, with_raw: bool) -> Self {
        self.with_raw = with_raw;
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

impl Validate for ReverseQuery {
    fn validate(&self) -> Result<()> {
        validate_lat_lon(self.lat, self.lon)?;
        validate_common(self.country_code.as_deref(), &self.language, self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestQuery {
    pub address: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Bias radius around `lat`/`lon`, in meters.
    #[serde(default)]
    pub radius: Option<u32>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub with_raw: bool,
}

impl SuggestQuery {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            country_code: None,
            lat: None,
            lon: None,
            radius: None,
            language: default_language(),
            limit: DEFAULT_RESULT_LIMIT,
            with_raw: false,
        }
    }

    #[must_use]
    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, lat: f64, lon: f64) -> Self {
        self.lat = Some(lat);
        self.lon = Some(lon);
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_raw(mut self, with_raw: bool) -> Self {
        self.with_raw = with_raw;
        self
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}

impl Validate for SuggestQuery {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("address", &self.address)?;
        validate_common(self.country_code.as_deref(), &self.language, self.limit)?;

        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => validate_lat_lon(lat, lon)?,
            (None, None) => {
                if self.radius.is_some() {
                    return Err(GeocoderError::validation(
                        "radius",
                        "radius requires lat and lon",
                    ));
                }
            }
            _ => {
                return Err(GeocoderError::validation(
                    "lat",
                    "lat and lon must be provided together",
                ))
            }
        }

        if self.radius == Some(0) {
            return Err(GeocoderError::validation("radius", "Value must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailsQuery {
    pub place_id: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub with_raw: bool,
}

impl PlaceDetailsQuery {
    pub fn new(place_id: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            language: default_language(),
            with_raw: false,
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_raw(mut self, with_raw: bool) -> Self {
        self.with_raw = with_raw;
        self
    }
}

impl Validate for PlaceDetailsQuery {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("place_id", &self.place_id)?;
        validate_non_empty_string("language", &self.language)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceQuery {
    pub from: Coordinates,
    pub to: Coordinates,
    #[serde(default)]
    pub mode: TravelMode,
}

impl DistanceQuery {
    pub fn new(from: Coordinates, to: Coordinates) -> Self {
        Self {
            from,
            to,
            mode: TravelMode::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Validate for DistanceQuery {
    fn validate(&self) -> Result<()> {
        validate_lat_lon(self.from.lat, self.from.lon)?;
        validate_lat_lon(self.to.lat, self.to.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: GeocoderError) -> String {
        match err {
            GeocoderError::ValidationError { field, .. } => field,
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_geocode_query_defaults() {
        let query = GeocodeQuery::new("1158 E 89th St");
        assert_eq!(query.language, "en");
        assert_eq!(query.limit, 5);
        assert!(!query.with_raw);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_geocode_query_from_json_uses_defaults() {
        let query: GeocodeQuery =
            serde_json::from_str(r#"{"address": "1158 E 89th St", "countryCode": "US"}"#).unwrap();
        assert_eq!(query.country_code.as_deref(), Some("US"));
        assert_eq!(query.limit, DEFAULT_RESULT_LIMIT);
        assert_eq!(query.language, DEFAULT_RESULT_LANGUAGE);
    }

    #[test]
    fn test_geocode_query_validation() {
        assert_eq!(field_of(GeocodeQuery::new(" ").validate().unwrap_err()), "address");
        assert_eq!(
            field_of(GeocodeQuery::new("x").with_limit(0).validate().unwrap_err()),
            "limit"
        );
        assert_eq!(
            field_of(GeocodeQuery::new("x").with_limit(101).validate().unwrap_err()),
            "limit"
        );
        assert_eq!(
            field_of(
                GeocodeQuery::new("x")
                    .with_country_code("USA")
                    .validate()
                    .unwrap_err()
            ),
            "country_code"
        );
    }

    #[test]
    fn test_reverse_query_validation() {
        assert!(ReverseQuery::new(41.7340186, -87.5960762).validate().is_ok());
        assert_eq!(field_of(ReverseQuery::new(91.0, 0.0).validate().unwrap_err()), "lat");
        assert_eq!(field_of(ReverseQuery::new(0.0, -181.0).validate().unwrap_err()), "lon");
    }

    #[test]
    fn test_suggest_query_validation() {
        let base = SuggestQuery::new("1158 E 89th");
        assert!(base.clone().validate().is_ok());
        assert!(base
            .clone()
            .with_location(41.73, -87.59)
            .with_radius(25000)
            .validate()
            .is_ok());
        assert_eq!(field_of(base.clone().with_radius(100).validate().unwrap_err()), "radius");

        let mut half = base.clone();
        half.lat = Some(41.73);
        assert_eq!(field_of(half.validate().unwrap_err()), "lat");

        assert_eq!(
            field_of(
                base.with_location(41.73, -87.59)
                    .with_radius(0)
                    .validate()
                    .unwrap_err()
            ),
            "radius"
        );
    }

    #[test]
    fn test_place_details_and_distance_validation() {
        assert!(PlaceDetailsQuery::new("ChIJ").validate().is_ok());
        assert_eq!(field_of(PlaceDetailsQuery::new("").validate().unwrap_err()), "place_id");

        let ok = DistanceQuery::new(Coordinates::new(41.7, -87.5), Coordinates::new(41.8, -87.6));
        assert!(ok.validate().is_ok());
        let bad = DistanceQuery::new(Coordinates::new(100.0, 0.0), Coordinates::new(0.0, 0.0));
        assert_eq!(field_of(bad.validate().unwrap_err()), "lat");
    }
}
