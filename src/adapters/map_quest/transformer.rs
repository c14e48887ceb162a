use super::MAP_QUEST_PROVIDER_NAME;
use crate::core::command::decode;
use crate::domain::model::Location;
use crate::domain::ports::Transformer;
use crate::utils::error::Result;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapQuestLocation {
    lat_lng: LatLng,
    #[serde(default)]
    street: Option<String>,
    /// Country, ISO 3166-1 alpha-2.
    #[serde(default)]
    admin_area1: Option<String>,
    /// State.
    #[serde(default)]
    admin_area3: Option<String>,
    /// City.
    #[serde(default)]
    admin_area5: Option<String>,
    #[serde(default)]
    postal_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// MapQuest sends empty strings for unknown components.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct MapQuestLocationTransformer;

impl Transformer<Location> for MapQuestLocationTransformer {
    fn transform(&self, raw: &Value) -> Result<Location> {
        let item: MapQuestLocation = decode(raw)?;

        // US/CA answers carry the two-letter code, elsewhere the full name.
        let (state, state_code) = match non_empty(item.admin_area3) {
            Some(s) if s.len() == 2 && s.chars().all(|c| c.is_ascii_uppercase()) => {
                (None, Some(s))
            }
            other => (other, None),
        };

        let location = Location {
            provider: MAP_QUEST_PROVIDER_NAME.to_string(),
            latitude: item.lat_lng.lat,
            longitude: item.lat_lng.lng,
            country_code: non_empty(item.admin_area1),
            state,
            state_code,
            city: non_empty(item.admin_area5),
            postal_code: non_empty(item.postal_code),
            street_name: non_empty(item.street),
            raw: Some(raw.clone()),
            ..Default::default()
        };
        Ok(location.with_inferred_accuracy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Accuracy;
    use serde_json::json;

    #[test]
    fn test_location_fields() {
        let raw = json!({
            "street": "1158 E 89th St",
            "adminArea6": "",
            "adminArea5": "Chicago",
            "adminArea5Type": "City",
            "adminArea4": "Cook",
            "adminArea3": "IL",
            "adminArea3Type": "State",
            "adminArea1": "US",
            "adminArea1Type": "Country",
            "postalCode": "60619-7120",
            "geocodeQuality": "ADDRESS",
            "latLng": {"lat": 41.734019, "lng": -87.596076}
        });

        let location = MapQuestLocationTransformer.transform(&raw).unwrap();

        assert_eq!(location.provider, "map_quest");
        assert_eq!(location.latitude, 41.734019);
        assert_eq!(location.country_code.as_deref(), Some("US"));
        assert_eq!(location.state_code.as_deref(), Some("IL"));
        assert!(location.state.is_none());
        assert_eq!(location.city.as_deref(), Some("Chicago"));
        assert_eq!(location.postal_code.as_deref(), Some("60619-7120"));
        assert_eq!(location.street_name.as_deref(), Some("1158 E 89th St"));
        assert!(location.house_number.is_none());
        assert_eq!(location.accuracy, Some(Accuracy::StreetName));
    }

    #[test]
    fn test_full_state_name_and_blank_fields() {
        let raw = json!({
            "street": "",
            "adminArea5": "",
            "adminArea3": "Bavaria",
            "adminArea1": "DE",
            "postalCode": "",
            "latLng": {"lat": 48.1, "lng": 11.5}
        });

        let location = MapQuestLocationTransformer.transform(&raw).unwrap();

        assert_eq!(location.state.as_deref(), Some("Bavaria"));
        assert!(location.state_code.is_none());
        assert!(location.street_name.is_none());
        assert!(location.city.is_none());
        assert_eq!(location.accuracy, Some(Accuracy::State));
    }
}
