pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::Cli;

pub use crate::adapters::http::{HttpClient, HttpClientConfig};
pub use crate::adapters::{GoogleMapsProvider, HereProvider, MapQuestProvider};
pub use crate::config::toml_config::GeocoderConfig;
pub use crate::core::{chain::ChainProvider, geocoder::Geocoder};
pub use crate::domain::model::{Accuracy, Coordinates, DistanceDetails, Location, Suggestion, TravelMode};
pub use crate::domain::ports::Provider;
pub use crate::domain::query::{DistanceQuery, GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery};
pub use crate::utils::error::{GeocoderError, Result};
