use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

use crate::{codes, error::QueryError};

/// Shape a requested date must have. Only the shape is checked, not the calendar.
pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DATE_PATTERN).expect("date pattern is a valid regex"));

/// A single `getWeather` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub location: String,
    /// `YYYY-MM-DD`; `None` asks for current conditions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl WeatherQuery {
    pub fn current(location: impl Into<String>) -> Self {
        Self { location: location.into(), date: None }
    }

    pub fn on_date(location: impl Into<String>, date: impl Into<String>) -> Self {
        Self { location: location.into(), date: Some(date.into()) }
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if self.location.is_empty() {
            return Err(QueryError::EmptyLocation);
        }

        match &self.date {
            Some(date) if !DATE_RE.is_match(date) => Err(QueryError::MalformedDate(date.clone())),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The four values pulled out of either weather payload shape.
///
/// Numbers keep the representation the upstream service used, so `25` stays
/// an integer and `25.3` stays a float when the result is serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherReading {
    pub temperature: Option<Number>,
    pub humidity: Option<Number>,
    pub wind_speed: Option<Number>,
    pub weather_code: Option<i64>,
}

/// `current` block of a forecast response.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Option<Number>,
    #[serde(rename = "relative_humidity_2m", default)]
    pub humidity: Option<Number>,
    #[serde(rename = "wind_speed_10m", default)]
    pub wind_speed: Option<Number>,
    #[serde(default, deserialize_with = "deserialize_code")]
    pub weather_code: Option<i64>,
}

impl From<CurrentConditions> for WeatherReading {
    fn from(current: CurrentConditions) -> Self {
        Self {
            temperature: current.temperature,
            humidity: current.humidity,
            wind_speed: current.wind_speed,
            weather_code: current.weather_code,
        }
    }
}

/// `daily` block of a forecast response: parallel series keyed by `time`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_mean", default)]
    pub temperature: Vec<Option<Number>>,
    #[serde(rename = "relative_humidity_2m_mean", default)]
    pub humidity: Vec<Option<Number>>,
    #[serde(rename = "wind_speed_10m_max", default)]
    pub wind_speed: Vec<Option<Number>>,
    #[serde(default, deserialize_with = "deserialize_code_series")]
    pub weather_code: Vec<Option<i64>>,
}

impl DailySeries {
    /// Reading for the entry whose `time` equals `date` exactly.
    pub fn reading_for(&self, date: &str) -> Option<WeatherReading> {
        let idx = self.time.iter().position(|day| day == date)?;

        Some(WeatherReading {
            temperature: value_at(&self.temperature, idx),
            humidity: value_at(&self.humidity, idx),
            wind_speed: value_at(&self.wind_speed, idx),
            weather_code: value_at(&self.weather_code, idx),
        })
    }
}

/// Integral value of a code, whether sent as `3` or `3.0`. Fractional codes
/// match no table entry and read as missing.
fn integral_code(raw: &Number) -> Option<i64> {
    raw.as_i64().or_else(|| {
        raw.as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Number>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(integral_code))
}

fn deserialize_code_series<'de, D>(deserializer: D) -> Result<Vec<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Option<Number>>::deserialize(deserializer)?;
    Ok(raw.iter().map(|code| code.as_ref().and_then(integral_code)).collect())
}

fn value_at<T: Clone>(series: &[Option<T>], idx: usize) -> Option<T> {
    series.get(idx).cloned().flatten()
}

/// Normalized tool output. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub temperature: Option<Number>,
    pub humidity: Option<Number>,
    pub description: String,
    #[serde(rename = "windSpeed")]
    pub wind_speed: Option<Number>,
}

impl WeatherResult {
    pub fn from_reading(date: Option<String>, reading: WeatherReading) -> Self {
        let description = reading.weather_code.map_or(codes::UNKNOWN, codes::describe);

        Self {
            date,
            temperature: reading.temperature,
            humidity: reading.humidity,
            description: description.to_string(),
            wind_speed: reading.wind_speed,
        }
    }
}
