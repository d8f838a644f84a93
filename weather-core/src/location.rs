//! Finding the city to show on start-up.
//!
//! A terminal has no browser geolocation, so the position comes from a
//! [`Geolocator`]: either fixed coordinates from the command line / config,
//! or an approximate lookup of the machine's public IP.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};

use crate::{error::LocationError, model::Coordinates, provider::WeatherProvider};

const IP_API_URL: &str = "http://ip-api.com/json/";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Source of the device position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Always reports the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Approximate position of the public IP address, via ip-api.com.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    timeout: Duration,
    http: Client,
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::with_url(IP_API_URL)
    }
}

impl IpGeolocator {
    pub fn with_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            http: Client::new(),
        }
    }

    /// How long a lookup may take before it fails with [`LocationError::Timeout`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let res = self
            .http
            .get(&self.url)
            .query(&[("fields", "status,message,lat,lon")])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LocationError::Timeout
                } else {
                    LocationError::Other(e.to_string())
                }
            })?;

        let body: IpApiResponse =
            res.json().await.map_err(|e| LocationError::Other(e.to_string()))?;

        if body.status != "success" {
            tracing::debug!("IP geolocation refused: {:?}", body.message);
            return Err(LocationError::Unavailable);
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(LocationError::Other("IP geolocation returned no coordinates".into())),
        }
    }
}

/// Work out the city to show on start-up.
///
/// Returns an empty string when no city could be found: no geolocator, a
/// failed position request, a failed reverse lookup, or zero candidates.
/// None of those failures are reported to the user.
pub async fn resolve_initial_city(
    geolocator: Option<&dyn Geolocator>,
    provider: &dyn WeatherProvider,
) -> String {
    let Some(geolocator) = geolocator else {
        tracing::debug!("Geolocation unavailable, no automatic city");
        return String::new();
    };

    let coords = match geolocator.current_position().await {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("Geolocation failed: {}", e);
            return String::new();
        }
    };

    match provider.reverse_geocode(coords).await {
        Ok(candidates) => match candidates.into_iter().next() {
            Some(first) => {
                tracing::info!("Reverse geocoded to: {}", first.name);
                first.name
            }
            None => {
                tracing::debug!("Reverse geocode returned no candidates");
                String::new()
            }
        },
        Err(e) => {
            tracing::debug!("Reverse geocode failed: {}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::WeatherError,
        model::{GeoCandidate, WeatherRecord},
    };
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Denied;

    #[async_trait]
    impl Geolocator for Denied {
        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            Err(LocationError::PermissionDenied)
        }
    }

    /// Provider answering reverse lookups from a canned list.
    #[derive(Debug, Default)]
    struct Gazetteer {
        names: Vec<&'static str>,
        fail: bool,
        lookups: Mutex<Vec<Coordinates>>,
    }

    #[async_trait]
    impl WeatherProvider for Gazetteer {
        async fn current_weather(&self, _city: &str) -> Result<WeatherRecord, WeatherError> {
            unreachable!("the resolver never fetches weather")
        }

        async fn reverse_geocode(
            &self,
            coords: Coordinates,
        ) -> Result<Vec<GeoCandidate>, WeatherError> {
            self.lookups.lock().unwrap().push(coords);
            if self.fail {
                return Err(WeatherError::Api { message: Some("Invalid API key".into()) });
            }
            Ok(self
                .names
                .iter()
                .map(|n| GeoCandidate {
                    name: n.to_string(),
                    country: "XX".into(),
                    state: None,
                    lat: coords.latitude,
                    lon: coords.longitude,
                })
                .collect())
        }
    }

    const PARIS: Coordinates = Coordinates { latitude: 48.85, longitude: 2.35 };

    #[tokio::test]
    async fn first_candidate_wins() {
        let provider = Gazetteer { names: vec!["Paris", "Boulogne"], ..Default::default() };
        let geo = FixedPosition(PARIS);

        let city = resolve_initial_city(Some(&geo), &provider).await;

        assert_eq!(city, "Paris");
        assert_eq!(provider.lookups.lock().unwrap().as_slice(), &[PARIS]);
    }

    #[tokio::test]
    async fn no_geolocator_skips_lookup() {
        let provider = Gazetteer { names: vec!["Paris"], ..Default::default() };

        let city = resolve_initial_city(None, &provider).await;

        assert!(city.is_empty());
        assert!(provider.lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn denied_permission_is_silent() {
        let provider = Gazetteer { names: vec!["Paris"], ..Default::default() };

        let city = resolve_initial_city(Some(&Denied), &provider).await;

        assert!(city.is_empty());
        assert!(provider.lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_or_failed_lookup_yields_empty_city() {
        let geo = FixedPosition(PARIS);

        let empty = Gazetteer::default();
        assert!(resolve_initial_city(Some(&geo), &empty).await.is_empty());

        let failing = Gazetteer { names: vec!["Paris"], fail: true, ..Default::default() };
        assert!(resolve_initial_city(Some(&geo), &failing).await.is_empty());
    }
}
