use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    Config, LookupError, WeatherQuery, WeatherResult,
    provider::{Geocoder, OpenMeteoProvider, WeatherSource},
};

/// Two-step pipeline: resolve the location, then fetch weather for it.
/// The first failing step ends the lookup.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
}

impl WeatherLookup {
    pub fn new(geocoder: Arc<dyn Geocoder>, weather: Arc<dyn WeatherSource>) -> Self {
        Self { geocoder, weather }
    }

    /// Open-Meteo for both steps, configured from `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = Arc::new(OpenMeteoProvider::from_config(config)?);
        Ok(Self::new(provider.clone(), provider))
    }

    #[instrument(skip(self), fields(location = %query.location, date = ?query.date))]
    pub async fn lookup(&self, query: &WeatherQuery) -> Result<WeatherResult, LookupError> {
        let coords = self.geocoder.resolve(&query.location).await?;

        let reading = match query.date.as_deref() {
            None => self.weather.current(coords).await?,
            Some(date) => self.weather.daily(coords, date).await?,
        };

        Ok(WeatherResult::from_reading(query.date.clone(), reading))
    }

    /// Runs [`lookup`](Self::lookup) and renders the outcome as tool text.
    pub async fn respond(&self, query: &WeatherQuery) -> String {
        let outcome = self.lookup(query).await;
        if let Err(err) = &outcome {
            debug!(error = %err, "lookup ended without a result");
        }
        render(&outcome)
    }
}

/// Pretty JSON for a result, the error message otherwise.
pub fn render(outcome: &Result<WeatherResult, LookupError>) -> String {
    match outcome {
        Ok(result) => serde_json::to_string_pretty(result)
            .unwrap_or_else(|e| LookupError::unexpected(e).to_string()),
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinates, WeatherReading, error::Upstream};
    use async_trait::async_trait;
    use serde_json::{Number, json};
    use std::sync::Mutex;

    #[derive(Debug)]
    struct FixedGeocoder(Result<Coordinates, LookupError>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, _location: &str) -> Result<Coordinates, LookupError> {
            self.0.clone()
        }
    }

    /// Records every call it receives.
    #[derive(Debug, Default)]
    struct RecordingSource {
        calls: Mutex<Vec<String>>,
        daily: Option<WeatherReading>,
    }

    #[async_trait]
    impl WeatherSource for RecordingSource {
        async fn current(&self, at: Coordinates) -> Result<WeatherReading, LookupError> {
            self.calls.lock().unwrap().push(format!("current {} {}", at.latitude, at.longitude));
            Ok(WeatherReading {
                temperature: Some(Number::from(25_u64)),
                humidity: Some(Number::from(40_u64)),
                wind_speed: Some(Number::from(10_u64)),
                weather_code: Some(0),
            })
        }

        async fn daily(&self, _at: Coordinates, date: &str) -> Result<WeatherReading, LookupError> {
            self.calls.lock().unwrap().push(format!("daily {date}"));
            self.daily.clone().ok_or_else(|| LookupError::NoDataForDate(date.to_string()))
        }
    }

    const LAHORE: Coordinates = Coordinates { latitude: 31.5, longitude: 74.3 };

    fn pipeline(
        geocoded: Result<Coordinates, LookupError>,
        source: RecordingSource,
    ) -> (WeatherLookup, Arc<RecordingSource>) {
        let source = Arc::new(source);
        (WeatherLookup::new(Arc::new(FixedGeocoder(geocoded)), source.clone()), source)
    }

    #[tokio::test]
    async fn current_flow_renders_result_json() {
        let (lookup, source) = pipeline(Ok(LAHORE), RecordingSource::default());

        let text = lookup.respond(&WeatherQuery::current("Lahore")).await;
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            value,
            json!({"temperature": 25, "humidity": 40, "description": "Clear sky", "windSpeed": 10})
        );
        assert!(text.contains("\n  \"temperature\": 25"), "expected pretty output: {text}");
        assert_eq!(*source.calls.lock().unwrap(), vec!["current 31.5 74.3".to_string()]);
    }

    #[tokio::test]
    async fn daily_flow_carries_date_into_result() {
        let reading = WeatherReading { weather_code: Some(61), ..Default::default() };
        let (lookup, _) =
            pipeline(Ok(LAHORE), RecordingSource { daily: Some(reading), ..Default::default() });

        let result = lookup.lookup(&WeatherQuery::on_date("Lahore", "2024-01-01")).await.unwrap();

        assert_eq!(result.date.as_deref(), Some("2024-01-01"));
        assert_eq!(result.description, "Slight rain");
    }

    #[tokio::test]
    async fn geocoding_failure_skips_weather_call() {
        let failure = LookupError::UpstreamStatus {
            service: Upstream::Geocoding,
            status: "Internal Server Error".into(),
        };
        let (lookup, source) = pipeline(Err(failure), RecordingSource::default());

        let text = lookup.respond(&WeatherQuery::current("Lahore")).await;

        assert_eq!(text, "Geocoding API error: Internal Server Error");
        assert!(source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_location_is_reported_verbatim() {
        let (lookup, source) = pipeline(Err(LookupError::NotFound), RecordingSource::default());

        assert_eq!(lookup.respond(&WeatherQuery::current("Atlantis")).await, "Location not found");
        assert!(source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_day_is_reported_with_date() {
        let (lookup, _) = pipeline(Ok(LAHORE), RecordingSource::default());

        let text = lookup.respond(&WeatherQuery::on_date("Lahore", "1999-12-31")).await;

        assert_eq!(text, "No weather data for 1999-12-31");
    }
}
