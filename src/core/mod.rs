pub mod chain;
pub mod command;
pub mod geocoder;

pub use crate::domain::model::{Accuracy, DistanceDetails, Location, Suggestion};
pub use crate::domain::ports::{Provider, Transformer};
pub use crate::utils::error::Result;
