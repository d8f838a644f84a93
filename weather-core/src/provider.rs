use crate::{
    config::Config,
    error::WeatherError,
    model::{Coordinates, GeoCandidate, WeatherRecord},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Remote source of weather data and place names.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`, in metric units.
    async fn current_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError>;

    /// Place names near `coords`, best match first. May be empty.
    async fn reverse_geocode(&self, coords: Coordinates)
    -> Result<Vec<GeoCandidate>, WeatherError>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not an error here: requests go out with a blank key
/// and the API's authorization error ends up in the error banner.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let api_key = config.api_key().unwrap_or_else(|| {
        tracing::warn!(
            "No OpenWeather API key configured. Hint: run `weather configure` or set {}.",
            crate::config::API_KEY_ENV
        );
        String::new()
    });

    Box::new(OpenWeatherProvider::with_base_url(api_key, config.base_url()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_uses_configured_base_url() {
        let cfg = Config { base_url: Some("http://localhost:9".into()), ..Config::default() };

        let provider = provider_from_config(&cfg);
        assert!(format!("{provider:?}").contains("http://localhost:9"));
    }

    #[test]
    fn provider_builds_without_api_key() {
        let provider = provider_from_config(&Config::default());
        assert!(format!("{provider:?}").contains("api.openweathermap.org"));
    }
}
