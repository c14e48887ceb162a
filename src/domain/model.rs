use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Precision of a location, ordered from least to most precise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accuracy {
    Country,
    State,
    City,
    PostalCode,
    StreetName,
    HouseNumber,
}

impl Accuracy {
    pub const ALL: [Accuracy; 6] = [
        Accuracy::Country,
        Accuracy::State,
        Accuracy::City,
        Accuracy::PostalCode,
        Accuracy::StreetName,
        Accuracy::HouseNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
            Self::PostalCode => "postalCode",
            Self::StreetName => "streetName",
            Self::HouseNumber => "houseNumber",
        }
    }

    /// The most precise component a location actually carries.
    pub fn of(location: &Location) -> Option<Self> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        if present(&location.house_number) {
            Some(Self::HouseNumber)
        } else if present(&location.street_name) {
            Some(Self::StreetName)
        } else if present(&location.postal_code) {
            Some(Self::PostalCode)
        } else if present(&location.city) {
            Some(Self::City)
        } else if present(&location.state) || present(&location.state_code) {
            Some(Self::State)
        } else if present(&location.country) || present(&location.country_code) {
            Some(Self::Country)
        } else {
            None
        }
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Accuracy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(Accuracy::as_str).collect();
                format!("Unknown accuracy '{}'. Use one of: {}", s, known.join(", "))
            })
    }
}

/// Normalized geocoding result, identical in shape for every provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<Accuracy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl Location {
    /// Recomputes `accuracy` from the populated fields.
    pub fn with_inferred_accuracy(mut self) -> Self {
        self.accuracy = Accuracy::of(&self);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub provider: String,
    pub formatted_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
            Self::Transit => "transit",
        }
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "driving" => Ok(Self::Driving),
            "walking" => Ok(Self::Walking),
            "bicycling" => Ok(Self::Bicycling),
            "transit" => Ok(Self::Transit),
            _ => Err(format!(
                "Unknown travel mode '{}'. Use driving, walking, bicycling or transit.",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceDetails {
    pub provider: String,
    /// Meters.
    pub distance: u64,
    /// Seconds.
    pub duration: u64,
    pub mode: TravelMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}
