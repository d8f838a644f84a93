use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::{
    config::DEFAULT_BASE_URL,
    error::WeatherError,
    model::{Coordinates, GeoCandidate, WeatherRecord},
};

use super::WeatherProvider;

/// `cod` value of a successful current-weather payload.
const SUCCESS_CODE: f64 = 200.0;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "<none>" } else { "<redacted>" })
            .finish()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        tracing::debug!(%status, path, "OpenWeather responded: {}", truncate_body(&body));

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    visibility: Option<u32>,
    clouds: OwClouds,
}

/// Map a current-weather body onto a [`WeatherRecord`].
///
/// The body is inspected whatever the HTTP status: OpenWeather reports
/// failures in the payload's `cod` (a number or a string) and `message`.
fn parse_current(body: &str) -> Result<WeatherRecord, WeatherError> {
    let value: Value = serde_json::from_str(body)?;

    if value.get("cod").and_then(Value::as_f64) != Some(SUCCESS_CODE) {
        let message = value.get("message").and_then(Value::as_str).map(str::to_owned);
        return Err(WeatherError::Api { message });
    }

    let parsed: OwCurrentResponse = serde_json::from_value(value)?;
    let condition = parsed
        .weather
        .into_iter()
        .next()
        .ok_or(WeatherError::MissingField("weather[0]"))?;

    Ok(WeatherRecord {
        location_name: parsed.name,
        country_code: parsed.sys.country,
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        condition_main: condition.main,
        condition_description: condition.description,
        condition_icon_id: condition.icon,
        humidity_pct: parsed.main.humidity,
        wind_speed_ms: parsed.wind.speed,
        pressure_hpa: parsed.main.pressure,
        visibility_m: parsed.visibility.unwrap_or(0),
        cloudiness_pct: parsed.clouds.all,
    })
}

/// The geocoding API answers with an array, or with an error object.
fn parse_reverse(body: &str) -> Result<Vec<GeoCandidate>, WeatherError> {
    let value: Value = serde_json::from_str(body)?;

    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }

    let message = value.get("message").and_then(Value::as_str).map(str::to_owned);
    Err(WeatherError::Api { message })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        let body = self
            .get("/data/2.5/weather", &[("q", city), ("units", "metric")])
            .await?;

        parse_current(&body)
    }

    async fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<GeoCandidate>, WeatherError> {
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();

        let query = [("lat", lat.as_str()), ("lon", lon.as_str()), ("limit", "1")];
        let body = self.get("/geo/1.0/reverse", &query).await?;

        parse_reverse(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
