use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    Config,
    error::{LookupError, Upstream},
    model::{Coordinates, CurrentConditions, DailySeries, WeatherReading},
};

use super::{Geocoder, WeatherSource};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code";
const DAILY_FIELDS: &str =
    "temperature_2m_mean,relative_humidity_2m_mean,wind_speed_10m_max,weather_code";

/// Open-Meteo geocoding and forecast APIs. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: String,
    weather_url: String,
}

impl OpenMeteoProvider {
    pub fn new(geocoding_url: String, weather_url: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, geocoding_url, weather_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.geocoding_url.clone(), config.weather_url.clone(), config.timeout())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: Upstream,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, LookupError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| LookupError::transport(service, e))?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "{service} request failed");
            return Err(LookupError::UpstreamStatus { service, status: status_text(status) });
        }

        let body = res.text().await.map_err(|e| LookupError::transport(service, e))?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "{service} returned an unreadable body");
            LookupError::unexpected(e)
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<Coordinates>>,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: DailySeries,
}

#[async_trait]
impl Geocoder for OpenMeteoProvider {
    #[instrument(skip(self))]
    async fn resolve(&self, location: &str) -> Result<Coordinates, LookupError> {
        let parsed: GeocodingResponse = self
            .get_json(
                Upstream::Geocoding,
                &self.geocoding_url,
                &[("name", location.to_string()), ("count", "1".to_string())],
            )
            .await?;

        let coords = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or(LookupError::NotFound)?;

        debug!(latitude = coords.latitude, longitude = coords.longitude, "resolved location");
        Ok(coords)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoProvider {
    #[instrument(skip(self))]
    async fn current(&self, at: Coordinates) -> Result<WeatherReading, LookupError> {
        let parsed: CurrentResponse = self
            .get_json(
                Upstream::Weather,
                &self.weather_url,
                &[
                    ("latitude", at.latitude.to_string()),
                    ("longitude", at.longitude.to_string()),
                    ("current", CURRENT_FIELDS.to_string()),
                ],
            )
            .await?;

        Ok(parsed.current.into())
    }

    #[instrument(skip(self))]
    async fn daily(&self, at: Coordinates, date: &str) -> Result<WeatherReading, LookupError> {
        let parsed: DailyResponse = self
            .get_json(
                Upstream::Weather,
                &self.weather_url,
                &[
                    ("latitude", at.latitude.to_string()),
                    ("longitude", at.longitude.to_string()),
                    ("daily", DAILY_FIELDS.to_string()),
                    ("start_date", date.to_string()),
                    ("end_date", date.to_string()),
                    ("timezone", "auto".to_string()),
                ],
            )
            .await?;

        parsed.daily.reading_for(date).ok_or_else(|| {
            debug!(returned = ?parsed.daily.time, "requested date missing from daily series");
            LookupError::NoDataForDate(date.to_string())
        })
    }
}

fn status_text(status: StatusCode) -> String {
    status.canonical_reason().map_or_else(|| status.as_str().to_string(), str::to_string)
}
