use super::HERE_PROVIDER_NAME;
use crate::core::command::decode;
use crate::domain::model::{Location, Suggestion};
use crate::domain::ports::Transformer;
use crate::utils::error::Result;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HereLocation {
    #[serde(default)]
    location_id: Option<String>,
    display_position: Position,
    #[serde(default)]
    address: HereAddress,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Position {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HereAddress {
    label: Option<String>,
    /// Abbreviated; the full name is in `AdditionalData`.
    state: Option<String>,
    city: Option<String>,
    street: Option<String>,
    house_number: Option<String>,
    postal_code: Option<String>,
    #[serde(default)]
    additional_data: Vec<AdditionalData>,
}

#[derive(Debug, Deserialize)]
struct AdditionalData {
    key: String,
    value: String,
}

impl HereAddress {
    fn additional(&self, key: &str) -> Option<String> {
        self.additional_data
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.value.clone())
    }
}

/// `Location` objects of geocode, reverse and place details answers.
pub struct HereLocationTransformer;

impl Transformer<Location> for HereLocationTransformer {
    fn transform(&self, raw: &Value) -> Result<Location> {
        let item: HereLocation = decode(raw)?;
        let address = &item.address;

        let location = Location {
            provider: HERE_PROVIDER_NAME.to_string(),
            formatted_address: address.label.clone(),
            latitude: item.display_position.latitude,
            longitude: item.display_position.longitude,
            country: address.additional("CountryName"),
            country_code: address.additional("Country2"),
            state: address.additional("StateName"),
            state_code: address.state.clone(),
            city: address.city.clone(),
            postal_code: address.postal_code.clone(),
            street_name: address.street.clone(),
            house_number: address.house_number.clone(),
            place_id: item.location_id,
            accuracy: None,
            raw: Some(raw.clone()),
        };
        Ok(location.with_inferred_accuracy())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HereSuggestion {
    label: String,
    #[serde(default)]
    location_id: Option<String>,
}

pub struct HereSuggestionTransformer;

impl Transformer<Suggestion> for HereSuggestionTransformer {
    fn transform(&self, raw: &Value) -> Result<Suggestion> {
        let suggestion: HereSuggestion = decode(raw)?;
        Ok(Suggestion {
            provider: HERE_PROVIDER_NAME.to_string(),
            formatted_address: suggestion.label,
            place_id: suggestion.location_id,
            raw: Some(raw.clone()),
        })
    }
}
