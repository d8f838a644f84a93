use serde::{Deserialize, Serialize};

/// A position reported by a [`Geolocator`](crate::location::Geolocator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// One entry of the reverse-geocoding answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCandidate {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
}

/// Display-ready subset of the current-weather payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location_name: String,
    pub country_code: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition_main: String,
    pub condition_description: String,
    pub condition_icon_id: String,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub pressure_hpa: u32,
    pub visibility_m: u32,
    pub cloudiness_pct: u8,
}

/// Everything the view needs to draw itself.
///
/// The flags are independent of each other; [`render`](crate::view::render)
/// decides which one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub city_text: String,
    pub weather: Option<WeatherRecord>,
    pub error_message: Option<String>,
    pub is_loading: bool,
}

impl UiState {
    pub(crate) fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    pub(crate) fn show_weather(&mut self, city: &str, record: WeatherRecord) {
        self.weather = Some(record);
        self.city_text = city.to_string();
    }

    pub(crate) fn show_error(&mut self, message: String) {
        self.weather = None;
        self.error_message = Some(message);
    }

    pub(crate) fn finish_loading(&mut self) {
        self.is_loading = false;
    }
}
