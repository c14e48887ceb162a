use super::GOOGLE_MAPS_PROVIDER_NAME;
use crate::core::command::decode;
use crate::domain::model::{DistanceDetails, Location, Suggestion, TravelMode};
use crate::domain::ports::Transformer;
use crate::utils::error::Result;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct GoogleResult {
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    place_id: Option<String>,
    geometry: Geometry,
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    short_name: String,
    #[serde(default)]
    types: Vec<String>,
}

fn component<'a>(components: &'a [AddressComponent], kind: &str) -> Option<&'a AddressComponent> {
    components
        .iter()
        .find(|c| c.types.iter().any(|t| t == kind))
}

/// Geocoding and Place Details `result` items.
pub struct GoogleMapsLocationTransformer;

impl Transformer<Location> for GoogleMapsLocationTransformer {
    fn transform(&self, raw: &Value) -> Result<Location> {
        let result: GoogleResult = decode(raw)?;
        let components = result.address_components.as_slice();
        let long = |kind: &str| component(components, kind).map(|c| c.long_name.clone());
        let short = |kind: &str| component(components, kind).map(|c| c.short_name.clone());

        let city = long("locality")
            .or_else(|| long("postal_town"))
            .or_else(|| long("sublocality"));

        let location = Location {
            provider: GOOGLE_MAPS_PROVIDER_NAME.to_string(),
            formatted_address: result.formatted_address,
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
            country: long("country"),
            country_code: short("country"),
            state: long("administrative_area_level_1"),
            state_code: short("administrative_area_level_1"),
            city,
            postal_code: long("postal_code"),
            street_name: long("route"),
            house_number: long("street_number"),
            place_id: result.place_id,
            accuracy: None,
            raw: Some(raw.clone()),
        };
        Ok(location.with_inferred_accuracy())
    }
}

#[derive(Debug, Deserialize)]
struct Prediction {
    description: String,
    #[serde(default)]
    place_id: Option<String>,
}

/// Places Autocomplete `predictions` items.
pub struct GoogleMapsSuggestionTransformer;

impl Transformer<Suggestion> for GoogleMapsSuggestionTransformer {
    fn transform(&self, raw: &Value) -> Result<Suggestion> {
        let prediction: Prediction = decode(raw)?;
        Ok(Suggestion {
            provider: GOOGLE_MAPS_PROVIDER_NAME.to_string(),
            formatted_address: prediction.description,
            place_id: prediction.place_id,
            raw: Some(raw.clone()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    distance: MatrixValue,
    duration: MatrixValue,
}

#[derive(Debug, Deserialize)]
struct MatrixValue {
    value: u64,
}

/// Distance Matrix element for a single origin/destination pair.
pub struct GoogleMapsDistanceTransformer {
    mode: TravelMode,
}

impl GoogleMapsDistanceTransformer {
    pub fn new(mode: TravelMode) -> Self {
        Self { mode }
    }
}

impl Transformer<DistanceDetails> for GoogleMapsDistanceTransformer {
    fn transform(&self, raw: &Value) -> Result<DistanceDetails> {
        let element: MatrixElement = decode(raw)?;
        Ok(DistanceDetails {
            provider: GOOGLE_MAPS_PROVIDER_NAME.to_string(),
            distance: element.distance.value,
            duration: element.duration.value,
            mode: self.mode,
            raw: Some(raw.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Accuracy;
    use crate::utils::error::GeocoderError;
    use serde_json::json;

    fn chicago() -> Value {
        json!({
            "address_components": [
                {"long_name": "1158", "short_name": "1158", "types": ["street_number"]},
                {"long_name": "East 89th Street", "short_name": "E 89th St", "types": ["route"]},
                {"long_name": "Chicago", "short_name": "Chicago", "types": ["locality", "political"]},
                {"long_name": "Illinois", "short_name": "IL", "types": ["administrative_area_level_1", "political"]},
                {"long_name": "United States", "short_name": "US", "types": ["country", "political"]},
                {"long_name": "60619", "short_name": "60619", "types": ["postal_code"]}
            ],
            "formatted_address": "1158 E 89th St, Chicago, IL 60619, USA",
            "geometry": {"location": {"lat": 41.7340186, "lng": -87.5960762}},
            "place_id": "ChIJ9xm0vj0mDogRyQAGHmFMT1g"
        })
    }

    #[test]
    fn test_location_fields() {
        let location = GoogleMapsLocationTransformer.transform(&chicago()).unwrap();

        assert_eq!(location.provider, "google_maps");
        assert_eq!(location.latitude, 41.7340186);
        assert_eq!(location.longitude, -87.5960762);
        assert_eq!(location.house_number.as_deref(), Some("1158"));
        assert_eq!(location.street_name.as_deref(), Some("East 89th Street"));
        assert_eq!(location.city.as_deref(), Some("Chicago"));
        assert_eq!(location.state.as_deref(), Some("Illinois"));
        assert_eq!(location.state_code.as_deref(), Some("IL"));
        assert_eq!(location.country.as_deref(), Some("United States"));
        assert_eq!(location.country_code.as_deref(), Some("US"));
        assert_eq!(location.postal_code.as_deref(), Some("60619"));
        assert_eq!(location.place_id.as_deref(), Some("ChIJ9xm0vj0mDogRyQAGHmFMT1g"));
        assert_eq!(location.accuracy, Some(Accuracy::HouseNumber));
        assert_eq!(location.raw, Some(chicago()));
    }

    #[test]
    fn test_city_falls_back_to_postal_town() {
        let raw = json!({
            "address_components": [
                {"long_name": "London", "short_name": "London", "types": ["postal_town"]},
                {"long_name": "United Kingdom", "short_name": "GB", "types": ["country"]}
            ],
            "geometry": {"location": {"lat": 51.5, "lng": -0.12}}
        });

        let location = GoogleMapsLocationTransformer.transform(&raw).unwrap();
        assert_eq!(location.city.as_deref(), Some("London"));
        assert_eq!(location.accuracy, Some(Accuracy::City));
        assert!(location.formatted_address.is_none());
    }

    #[test]
    fn test_missing_geometry_is_invalid_response() {
        let err = GoogleMapsLocationTransformer
            .transform(&json!({"formatted_address": "nowhere"}))
            .unwrap_err();
        assert!(matches!(err, GeocoderError::InvalidServerResponse(_)));
    }

    #[test]
    fn test_suggestion() {
        let suggestion = GoogleMapsSuggestionTransformer
            .transform(&json!({
                "description": "1158 E 89th St, Chicago, IL, USA",
                "place_id": "ChIJ9xm0vj0mDogRyQAGHmFMT1g"
            }))
            .unwrap();

        assert_eq!(suggestion.formatted_address, "1158 E 89th St, Chicago, IL, USA");
        assert_eq!(suggestion.place_id.as_deref(), Some("ChIJ9xm0vj0mDogRyQAGHmFMT1g"));
    }
}
