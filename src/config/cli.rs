use crate::config::ProviderKind;
use crate::domain::model::{Accuracy, Coordinates, TravelMode};
use crate::domain::query::{
    DistanceQuery, GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery,
    DEFAULT_RESULT_LANGUAGE, DEFAULT_RESULT_LIMIT,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "geocoder", version)]
#[command(about = "Geocode addresses through Google Maps, MapQuest or HERE")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = "geocoder.toml")]
    pub config: PathBuf,

    /// Use this provider instead of the one selected in the config file
    #[arg(short, long, global = true)]
    pub provider: Option<ProviderKind>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Address to coordinates
    Geocode(GeocodeArgs),
    /// Coordinates to address
    Reverse(ReverseArgs),
    /// Autocomplete a partial address
    Suggest(SuggestArgs),
    /// Look up a place by provider id
    PlaceDetails(PlaceDetailsArgs),
    /// Travel distance and duration between two points
    Distance(DistanceArgs),
}

/// Options shared by every lookup.
#[derive(Debug, Args)]
pub struct OutputArgs {
    #[arg(long, default_value = DEFAULT_RESULT_LANGUAGE)]
    pub language: String,

    /// Include the provider's raw payload in each result
    #[arg(long)]
    pub with_raw: bool,
}

#[derive(Debug, Args)]
pub struct GeocodeArgs {
    pub address: String,

    #[arg(long)]
    pub country_code: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub state_code: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    #[arg(long, default_value_t = DEFAULT_RESULT_LIMIT)]
    pub limit: usize,

    /// Minimum accuracy: country, state, city, postalCode, streetName, houseNumber
    #[arg(long)]
    pub accuracy: Option<Accuracy>,

    /// Drop results that disagree with the structured fields above
    #[arg(long)]
    pub exact_match: bool,

    /// Copy structured fields above into results missing them
    #[arg(long)]
    pub fill_missing: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl GeocodeArgs {
    pub fn to_query(&self) -> GeocodeQuery {
        GeocodeQuery {
            address: self.address.clone(),
            country_code: self.country_code.clone(),
            state: self.state.clone(),
            state_code: self.state_code.clone(),
            city: self.city.clone(),
            postal_code: self.postal_code.clone(),
            language: self.output.language.clone(),
            limit: self.limit,
            accuracy: self.accuracy,
            exact_match: self.exact_match,
            fill_missing_query_properties: self.fill_missing,
            with_raw: self.output.with_raw,
        }
    }
}

#[derive(Debug, Args)]
pub struct ReverseArgs {
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(allow_negative_numbers = true)]
    pub lon: f64,

    #[arg(long)]
    pub country_code: Option<String>,

    #[arg(long, default_value_t = DEFAULT_RESULT_LIMIT)]
    pub limit: usize,

    #[arg(long)]
    pub accuracy: Option<Accuracy>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl ReverseArgs {
    pub fn to_query(&self) -> ReverseQuery {
        ReverseQuery {
            lat: self.lat,
            lon: self.lon,
            country_code: self.country_code.clone(),
            language: self.output.language.clone(),
            limit: self.limit,
            accuracy: self.accuracy,
            with_raw: self.output.with_raw,
        }
    }
}

#[derive(Debug, Args)]
pub struct SuggestArgs {
    pub address: String,

    #[arg(long)]
    pub country_code: Option<String>,

    /// Bias results around this point, as `lat,lon`
    #[arg(long, value_parser = parse_coordinates, allow_hyphen_values = true)]
    pub near: Option<Coordinates>,

    /// Bias radius in meters, requires --near
    #[arg(long, requires = "near")]
    pub radius: Option<u32>,

    #[arg(long, default_value_t = DEFAULT_RESULT_LIMIT)]
    pub limit: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl SuggestArgs {
    pub fn to_query(&self) -> SuggestQuery {
        SuggestQuery {
            address: self.address.clone(),
            country_code: self.country_code.clone(),
            lat: self.near.map(|c| c.lat),
            lon: self.near.map(|c| c.lon),
            radius: self.radius,
            language: self.output.language.clone(),
            limit: self.limit,
            with_raw: self.output.with_raw,
        }
    }
}

#[derive(Debug, Args)]
pub struct PlaceDetailsArgs {
    pub place_id: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl PlaceDetailsArgs {
    pub fn to_query(&self) -> PlaceDetailsQuery {
        PlaceDetailsQuery {
            place_id: self.place_id.clone(),
            language: self.output.language.clone(),
            with_raw: self.output.with_raw,
        }
    }
}

#[derive(Debug, Args)]
pub struct DistanceArgs {
    /// Origin as `lat,lon`
    #[arg(value_parser = parse_coordinates, allow_hyphen_values = true)]
    pub from: Coordinates,

    /// Destination as `lat,lon`
    #[arg(value_parser = parse_coordinates, allow_hyphen_values = true)]
    pub to: Coordinates,

    /// driving, walking, bicycling or transit
    #[arg(long, default_value = "driving")]
    pub mode: TravelMode,
}

impl DistanceArgs {
    pub fn to_query(&self) -> DistanceQuery {
        DistanceQuery::new(self.from, self.to).with_mode(self.mode)
    }
}

pub fn parse_coordinates(value: &str) -> Result<Coordinates, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lon`, got '{}'", value))?;

    let parse = |part: &str, name: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid {} '{}': {}", name, part.trim(), e))
    };

    Ok(Coordinates::new(parse(lat, "latitude")?, parse(lon, "longitude")?))
}
