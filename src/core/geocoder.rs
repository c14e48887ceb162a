use crate::domain::model::{Accuracy, DistanceDetails, Location, Suggestion};
use crate::domain::ports::Provider;
use crate::domain::query::{
    DistanceQuery, GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery,
};
use crate::utils::error::{GeocoderError, Result};
use crate::utils::validation::Validate;

/// Entry point: validates queries, dispatches them to a provider and
/// normalizes what comes back.
pub struct Geocoder<P: Provider> {
    provider: P,
}

impl<P: Provider> Geocoder<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<Location>> {
        query.validate()?;
        ensure_accuracy_supported(&self.provider, query.accuracy)?;

        tracing::info!(
            "Geocoding '{}' with provider {}",
            query.address,
            self.provider.name()
        );
        let locations = self.provider.geocode(query).await?;
        let received = locations.len();

        let mut locations = filter_by_accuracy(locations, query.accuracy);
        if query.exact_match {
            locations.retain(|location| matches_query(location, query));
        }
        if query.fill_missing_query_properties {
            for location in &mut locations {
                fill_missing_properties(location, query);
            }
        }
        let locations = finish(locations, query.limit, query.with_raw);

        tracing::debug!(
            "Provider {} returned {} locations, {} kept",
            self.provider.name(),
            received,
            locations.len()
        );
        Ok(locations)
    }

    pub async fn reverse(&self, query: &ReverseQuery) -> Result<Vec<Location>> {
        query.validate()?;
        ensure_accuracy_supported(&self.provider, query.accuracy)?;

        tracing::info!(
            "Reverse geocoding ({}) with provider {}",
            query.coordinates(),
            self.provider.name()
        );
        let locations = self.provider.reverse(query).await?;
        let locations = filter_by_accuracy(locations, query.accuracy);
        Ok(finish(locations, query.limit, query.with_raw))
    }

    pub async fn suggest(&self, query: &SuggestQuery) -> Result<Vec<Suggestion>> {
        query.validate()?;

        tracing::info!(
            "Suggesting for '{}' with provider {}",
            query.address,
            self.provider.name()
        );
        let mut suggestions = self.provider.suggest(query).await?;
        suggestions.truncate(query.limit);
        if !query.with_raw {
            for suggestion in &mut suggestions {
                suggestion.raw = None;
            }
        }
        Ok(suggestions)
    }

    pub async fn place_details(&self, query: &PlaceDetailsQuery) -> Result<Location> {
        query.validate()?;

        tracing::info!(
            "Fetching place {} with provider {}",
            query.place_id,
            self.provider.name()
        );
        let mut location = self.provider.place_details(query).await?;
        if !query.with_raw {
            location.raw = None;
        }
        Ok(location)
    }

    pub async fn distance(&self, query: &DistanceQuery) -> Result<DistanceDetails> {
        query.validate()?;

        tracing::info!(
            "Computing {} distance {} -> {} with provider {}",
            query.mode.as_str(),
            query.from,
            query.to,
            self.provider.name()
        );
        let mut details = self.provider.distance(query).await?;
        details.raw = None;
        Ok(details)
    }
}

/// Fails before any request when the provider cannot reach `requested`.
pub fn ensure_accuracy_supported<P: Provider + ?Sized>(
    provider: &P,
    requested: Option<Accuracy>,
) -> Result<()> {
    match requested {
        Some(requested) if requested > provider.max_accuracy() => {
            Err(GeocoderError::UnsupportedAccuracy {
                provider: provider.name().to_string(),
                requested,
                max: provider.max_accuracy(),
            })
        }
        _ => Ok(()),
    }
}

fn filter_by_accuracy(locations: Vec<Location>, requested: Option<Accuracy>) -> Vec<Location> {
    match requested {
        Some(requested) => locations
            .into_iter()
            .filter(|location| location.accuracy.is_some_and(|a| a >= requested))
            .collect(),
        None => locations,
    }
}

fn finish(mut locations: Vec<Location>, limit: usize, with_raw: bool) -> Vec<Location> {
    locations.truncate(limit);
    if !with_raw {
        for location in &mut locations {
            location.raw = None;
        }
    }
    locations
}

fn same(expected: Option<&str>, actual: Option<&str>) -> bool {
    match (expected, actual) {
        (Some(expected), Some(actual)) => {
            expected.trim().to_lowercase() == actual.trim().to_lowercase()
        }
        (Some(_), None) => false,
        (None, _) => true,
    }
}

fn matches_query(location: &Location, query: &GeocodeQuery) -> bool {
    let state_matches = match (query.state_code.as_deref(), query.state.as_deref()) {
        (None, None) => true,
        (code, name) => {
            (code.is_some() && same(code, location.state_code.as_deref()))
                || (name.is_some() && same(name, location.state.as_deref()))
        }
    };

    state_matches
        && same(query.country_code.as_deref(), location.country_code.as_deref())
        && same(query.city.as_deref(), location.city.as_deref())
        && same(query.postal_code.as_deref(), location.postal_code.as_deref())
}

fn fill_missing_properties(location: &mut Location, query: &GeocodeQuery) {
    fn fill(target: &mut Option<String>, source: &Option<String>) {
        if target.as_deref().map_or(true, |v| v.trim().is_empty()) {
            if let Some(value) = source {
                *target = Some(value.clone());
            }
        }
    }

    fill(&mut location.country_code, &query.country_code);
    fill(&mut location.state, &query.state);
    fill(&mut location.state_code, &query.state_code);
    fill(&mut location.city, &query.city);
    fill(&mut location.postal_code, &query.postal_code);
    location.accuracy = Accuracy::of(location);
}
