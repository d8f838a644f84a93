//! The state container tying location, fetching and rendering together.

use crate::{
    location::{Geolocator, resolve_initial_city},
    model::UiState,
    provider::WeatherProvider,
};

type Listener = Box<dyn FnMut(&UiState) + Send>;

/// Owns the [`UiState`] and the collaborators that update it.
///
/// Every state change is pushed to the subscribed listeners, which is how
/// the terminal front-end redraws the loading indicator mid-request.
pub struct WeatherApp {
    provider: Box<dyn WeatherProvider>,
    geolocator: Option<Box<dyn Geolocator>>,
    state: UiState,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for WeatherApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApp")
            .field("provider", &self.provider)
            .field("geolocator", &self.geolocator)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl WeatherApp {
    /// `geolocator` is `None` when geolocation is unsupported or not allowed.
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        geolocator: Option<Box<dyn Geolocator>>,
    ) -> Self {
        Self { provider, geolocator, state: UiState::default(), listeners: Vec::new() }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&UiState) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Start-up: look for the user's city and, if one is found, fetch its weather.
    pub async fn mount(&mut self) {
        let city =
            resolve_initial_city(self.geolocator.as_deref(), &*self.provider).await;
        self.fetch_weather(&city).await;
    }

    /// Mirror the live search input.
    pub fn set_city_text(&mut self, text: &str) {
        self.state.city_text = text.to_string();
        self.notify();
    }

    /// Fetch the current weather for `city` and publish the outcome.
    ///
    /// Blank input leaves the state untouched. Otherwise the state is
    /// loading for the whole request and not loading afterwards, whatever
    /// the outcome; a failure replaces any weather shown before.
    pub async fn fetch_weather(&mut self, city: &str) {
        if city.trim().is_empty() {
            return;
        }

        self.state.start_loading();
        self.notify();

        match self.provider.current_weather(city).await {
            Ok(record) => {
                tracing::info!(city, "Fetched weather for {}", record.location_name);
                self.state.show_weather(city, record);
            }
            Err(e) => {
                tracing::info!(city, "Weather fetch failed: {}", e);
                self.state.show_error(e.banner_message());
            }
        }

        self.state.finish_loading();
        self.notify();
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.state);
        }
    }
}
