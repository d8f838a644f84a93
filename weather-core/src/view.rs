//! Projection of [`UiState`] into something a front-end can draw.
//!
//! [`render`] is pure: the only input besides the state is the wall-clock
//! time shown on the weather card, which the caller passes in.

use chrono::{Local, NaiveTime};
use std::fmt;

use crate::model::{UiState, WeatherRecord};

pub const TITLE: &str = "🌤️ Weather App";
pub const SUBTITLE: &str = "Get Real-Time Weather Updates";
pub const SEARCH_PLACEHOLDER: &str = "Enter city name (e.g., Delhi, London, New York)";
pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "🌍 Search for a city to get started!";

const ICON_URL_TEMPLATE: &str = "https://openweathermap.org/img/wn/{icon}@4x.png";

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub search: SearchForm,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    pub value: String,
    pub placeholder: &'static str,
}

/// The one display branch that wins for a given state.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Loading,
    Error(String),
    Card(WeatherCard),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub location_name: String,
    pub country: String,
    pub local_time: String,
    pub icon_url: String,
    pub icon_alt: String,
    pub temperature: i64,
    pub condition: String,
    pub condition_detail: String,
    pub feels_like: i64,
    pub details: Vec<Detail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Half-up rounding: `-2.5` becomes `-2`, `2.5` becomes `3`.
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

pub fn icon_url(icon_id: &str) -> String {
    ICON_URL_TEMPLATE.replace("{icon}", icon_id)
}

/// Kilometres with one decimal, halves rounded up: `10000` → `"10.0"`, `1250` → `"1.3"`.
pub fn visibility_km(visibility_m: u32) -> String {
    let tenths = (u64::from(visibility_m) + 50) / 100;
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Not a real UV reading: a stand-in derived from the temperature.
pub fn uv_index_estimate(temperature_c: f64) -> i64 {
    round_half_up(temperature_c / 5.0)
}

/// The trimmed search input, or `None` when there is nothing to search for.
pub fn submit_search(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn render(state: &UiState, now: NaiveTime) -> Screen {
    let body = if state.is_loading {
        Body::Loading
    } else if let Some(message) = &state.error_message {
        Body::Error(message.clone())
    } else if let Some(weather) = &state.weather {
        Body::Card(weather_card(weather, now))
    } else {
        Body::Empty
    };

    Screen {
        title: TITLE,
        subtitle: SUBTITLE,
        search: SearchForm { value: state.city_text.clone(), placeholder: SEARCH_PLACEHOLDER },
        body,
    }
}

/// [`render`] at the current local time.
pub fn render_now(state: &UiState) -> Screen {
    render(state, Local::now().time())
}

fn weather_card(w: &WeatherRecord, now: NaiveTime) -> WeatherCard {
    let details = vec![
        Detail { icon: "💧", label: "Humidity", value: format!("{}%", w.humidity_pct) },
        Detail { icon: "💨", label: "Wind Speed", value: format!("{} m/s", w.wind_speed_ms) },
        Detail { icon: "🔽", label: "Pressure", value: format!("{} hPa", w.pressure_hpa) },
        Detail {
            icon: "👁️",
            label: "Visibility",
            value: format!("{} km", visibility_km(w.visibility_m)),
        },
        Detail { icon: "☁️", label: "Cloudiness", value: format!("{}%", w.cloudiness_pct) },
        Detail {
            icon: "↗️",
            label: "UV Index",
            value: uv_index_estimate(w.temperature_c).to_string(),
        },
    ];

    WeatherCard {
        location_name: w.location_name.clone(),
        country: w.country_code.clone(),
        local_time: now.format("%-I:%M:%S %p").to_string(),
        icon_url: icon_url(&w.condition_icon_id),
        icon_alt: w.condition_description.clone(),
        temperature: round_half_up(w.temperature_c),
        condition: w.condition_main.clone(),
        condition_detail: w.condition_description.to_uppercase(),
        feels_like: round_half_up(w.feels_like_c),
        details,
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.subtitle)?;
        writeln!(f, "{}", self.search)?;
        writeln!(f)?;
        match &self.body {
            Body::Loading => writeln!(f, "{LOADING_TEXT}"),
            Body::Error(message) => writeln!(f, "❌ {message}"),
            Body::Card(card) => write!(f, "{card}"),
            Body::Empty => writeln!(f, "{EMPTY_TEXT}"),
        }
    }
}

impl fmt::Display for SearchForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "🔍 {}", self.placeholder)
        } else {
            write!(f, "🔍 {}", self.value)
        }
    }
}

impl fmt::Display for WeatherCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}    {}", self.location_name, self.country, self.local_time)?;
        writeln!(f, "[{}] {}", self.icon_alt, self.icon_url)?;
        writeln!(f, "{}°C  {}", self.temperature, self.condition)?;
        writeln!(f, "{}", self.condition_detail)?;
        writeln!(f, "Feels like {}°C", self.feels_like)?;
        writeln!(f, "{}", "-".repeat(32))?;
        for d in &self.details {
            writeln!(f, "{} {:<12}{}", d.icon, d.label, d.value)?;
        }
        Ok(())
    }
}
