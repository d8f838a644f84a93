use thiserror::Error;

/// Banner text used when the weather API rejects a city without saying why.
pub const DEFAULT_ERROR_MESSAGE: &str = "City not found";

/// Failures of the geolocation capability.
///
/// None of these ever reach the user; the location resolver logs them and
/// falls back to "no automatic city".
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Failures talking to the weather API (current weather and reverse geocoding).
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The payload carried a non-success `cod`.
    #[error("{}", .message.as_deref().unwrap_or(DEFAULT_ERROR_MESSAGE))]
    Api { message: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Weather response is missing `{0}`")]
    MissingField(&'static str),
}

impl WeatherError {
    /// Text shown in the error banner.
    pub fn banner_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            msg
        }
    }
}
