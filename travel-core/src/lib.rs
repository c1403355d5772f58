//! Core library for the `travel` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the geocoding, weather and places services
//! - Shared domain models (location hits, weather, places)
//! - The concurrent per-place detail fan-out
//!
//! It is used by `travel-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod fanout;
pub mod model;
pub mod provider;

pub use config::{Config, Endpoints};
pub use error::ResolveError;
pub use fanout::{FanOut, fetch_details, resolve_place_detail_with};
pub use model::{Address, LocationHit, PlaceDetail, PlaceSummary, Point, WeatherSnapshot};
pub use provider::{LocationProvider, PlacesProvider, Providers, ServiceId, WeatherProvider};
