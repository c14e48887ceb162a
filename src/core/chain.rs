use crate::core::geocoder::ensure_accuracy_supported;
use crate::domain::model::{Accuracy, DistanceDetails, Location, Suggestion};
use crate::domain::ports::Provider;
use crate::domain::query::{
    DistanceQuery, GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery,
};
use crate::utils::error::{GeocoderError, Result};
use async_trait::async_trait;

pub const CHAIN_PROVIDER_NAME: &str = "chain";

/// Tries providers in order and returns the first non-empty result.
///
/// Errors are returned as soon as a provider fails; the chain only moves on
/// when a provider answers with nothing. Providers that cannot reach the
/// requested accuracy are skipped.
pub struct ChainProvider {
    providers: Vec<Box<dyn Provider>>,
}

impl ChainProvider {
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Result<Self> {
        if providers.is_empty() {
            return Err(GeocoderError::config("provider chain cannot be empty"));
        }
        Ok(Self { providers })
    }

    pub fn providers(&self) -> impl Iterator<Item = &dyn Provider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    fn capable(&self, requested: Option<Accuracy>) -> Result<Vec<&dyn Provider>> {
        let capable: Vec<&dyn Provider> = self
            .providers()
            .filter(|p| match ensure_accuracy_supported(*p, requested) {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!("Skipping provider {}: {}", p.name(), e);
                    false
                }
            })
            .collect();

        if capable.is_empty() {
            // Report against the chain as a whole.
            ensure_accuracy_supported(self, requested)?;
        }
        Ok(capable)
    }
}

#[async_trait]
impl Provider for ChainProvider {
    fn name(&self) -> &str {
        CHAIN_PROVIDER_NAME
    }

    fn max_accuracy(&self) -> Accuracy {
        self.providers()
            .map(|p| p.max_accuracy())
            .max()
            .unwrap_or(Accuracy::Country)
    }

    async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<Location>> {
        for provider in self.capable(query.accuracy)? {
            let locations = provider.geocode(query).await?;
            if !locations.is_empty() {
                tracing::debug!("Chain answered by provider {}", provider.name());
                return Ok(locations);
            }
        }
        Ok(Vec::new())
    }

    async fn reverse(&self, query: &ReverseQuery) -> Result<Vec<Location>> {
        for provider in self.capable(query.accuracy)? {
            let locations = provider.reverse(query).await?;
            if !locations.is_empty() {
                tracing::debug!("Chain answered by provider {}", provider.name());
                return Ok(locations);
            }
        }
        Ok(Vec::new())
    }

    async fn suggest(&self, query: &SuggestQuery) -> Result<Vec<Suggestion>> {
        let mut answered = false;
        for provider in self.providers() {
            match provider.suggest(query).await {
                Ok(suggestions) if !suggestions.is_empty() => return Ok(suggestions),
                Ok(_) => answered = true,
                Err(GeocoderError::NotImplemented { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        if answered {
            Ok(Vec::new())
        } else {
            Err(self.not_implemented("suggest"))
        }
    }

    async fn place_details(&self, query: &PlaceDetailsQuery) -> Result<Location> {
        for provider in self.providers() {
            match provider.place_details(query).await {
                Err(GeocoderError::NotImplemented { .. }) => continue,
                other => return other,
            }
        }
        Err(self.not_implemented("place details"))
    }

    async fn distance(&self, query: &DistanceQuery) -> Result<DistanceDetails> {
        for provider in self.providers() {
            match provider.distance(query).await {
                Err(GeocoderError::NotImplemented { .. }) => continue,
                other => return other,
            }
        }
        Err(self.not_implemented("distance"))
    }
}
