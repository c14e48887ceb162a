#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Providers that can be selected from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    GoogleMaps,
    MapQuest,
    Here,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::GoogleMaps, Self::MapQuest, Self::Here];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleMaps => "google_maps",
            Self::MapQuest => "map_quest",
            Self::Here => "here",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown provider '{}'. Use google_maps, map_quest or here.",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("google_maps".parse::<ProviderKind>(), Ok(ProviderKind::GoogleMaps));
        assert_eq!("map-quest".parse::<ProviderKind>(), Ok(ProviderKind::MapQuest));
        assert_eq!("HERE".parse::<ProviderKind>(), Ok(ProviderKind::Here));
        assert!("arcgis".parse::<ProviderKind>().is_err());
    }
}
