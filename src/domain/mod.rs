// Domain layer: shared models, queries and ports. No HTTP here.

pub mod model;
pub mod ports;
pub mod query;
