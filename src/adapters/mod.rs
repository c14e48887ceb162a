// Adapters layer: one module per third-party geocoding service, plus the shared HTTP client.

pub mod google_maps;
pub mod here;
pub mod http;
pub mod map_quest;

pub use google_maps::GoogleMapsProvider;
pub use here::HereProvider;
pub use map_quest::MapQuestProvider;
