//! Core library for the `weather` widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and the geolocation sources
//! - The UI state container and its pure text rendering
//!
//! It is used by `weather-cli`, but can also drive other front-ends.

pub mod app;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod view;

pub use app::WeatherApp;
pub use config::{Config, LocationConfig};
pub use error::{LocationError, WeatherError};
pub use location::{FixedPosition, Geolocator, IpGeolocator, resolve_initial_city};
pub use model::{Coordinates, GeoCandidate, UiState, WeatherRecord};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use view::{Screen, render, render_now, submit_search};
