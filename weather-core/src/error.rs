use std::fmt;

use thiserror::Error;

/// Which upstream call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Geocoding,
    Weather,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::Geocoding => f.write_str("Geocoding API"),
            Upstream::Weather => f.write_str("Weather API"),
        }
    }
}

/// Why a lookup ended without a [`WeatherResult`](crate::WeatherResult).
///
/// The `Display` text is exactly what the tool returns to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{service} error: {status}")]
    UpstreamStatus { service: Upstream, status: String },

    #[error("Location not found")]
    NotFound,

    #[error("No weather data for {0}")]
    NoDataForDate(String),

    #[error("Error fetching weather data: {0}")]
    Unexpected(String),
}

impl LookupError {
    pub const TIMED_OUT: &'static str = "request timed out";

    pub fn unexpected(err: impl fmt::Display) -> Self {
        let message = err.to_string();
        if message.is_empty() {
            Self::Unexpected("Unknown error".to_string())
        } else {
            Self::Unexpected(message)
        }
    }

    /// Maps a transport failure; a timeout counts as a failed status.
    pub fn transport(service: Upstream, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::UpstreamStatus { service, status: Self::TIMED_OUT.to_string() }
        } else {
            Self::unexpected(err)
        }
    }
}

/// Malformed `getWeather` arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("location must be a non-empty string")]
    EmptyLocation,

    #[error("date must be in YYYY-MM-DD form, got '{0}'")]
    MalformedDate(String),
}
