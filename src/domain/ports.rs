use crate::domain::model::{Accuracy, DistanceDetails, Location, Suggestion};
use crate::domain::query::{
    DistanceQuery, GeocodeQuery, PlaceDetailsQuery, ReverseQuery, SuggestQuery,
};
use crate::utils::error::{GeocoderError, Result};
use async_trait::async_trait;

/// One third-party geocoding service.
///
/// `geocode` and `reverse` are mandatory; the other operations default to
/// [`GeocoderError::NotImplemented`].
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// Most precise accuracy this provider can resolve.
    fn max_accuracy(&self) -> Accuracy;

    async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<Location>>;

    async fn reverse(&self, query: &ReverseQuery) -> Result<Vec<Location>>;

    async fn suggest(&self, _query: &SuggestQuery) -> Result<Vec<Suggestion>> {
        Err(self.not_implemented("suggest"))
    }

    async fn place_details(&self, _query: &PlaceDetailsQuery) -> Result<Location> {
        Err(self.not_implemented("place details"))
    }

    async fn distance(&self, _query: &DistanceQuery) -> Result<DistanceDetails> {
        Err(self.not_implemented("distance"))
    }

    fn not_implemented(&self, operation: &'static str) -> GeocoderError {
        GeocoderError::NotImplemented {
            provider: self.name().to_string(),
            operation,
        }
    }
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn max_accuracy(&self) -> Accuracy {
        (**self).max_accuracy()
    }

    async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<Location>> {
        (**self).geocode(query).await
    }

    async fn reverse(&self, query: &ReverseQuery) -> Result<Vec<Location>> {
        (**self).reverse(query).await
    }

    async fn suggest(&self, query: &SuggestQuery) -> Result<Vec<Suggestion>> {
        (**self).suggest(query).await
    }

    async fn place_details(&self, query: &PlaceDetailsQuery) -> Result<Location> {
        (**self).place_details(query).await
    }

    async fn distance(&self, query: &DistanceQuery) -> Result<DistanceDetails> {
        (**self).distance(query).await
    }
}

/// Maps one raw provider JSON item into a shared result shape.
pub trait Transformer<T> {
    fn transform(&self, raw: &serde_json::Value) -> Result<T>;
}
