use crate::{Coordinates, LookupError, WeatherReading};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// Resolves a place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Best single match for `location`, or [`LookupError::NotFound`].
    async fn resolve(&self, location: &str) -> Result<Coordinates, LookupError>;
}

/// Fetches weather readings for a point.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, at: Coordinates) -> Result<WeatherReading, LookupError>;

    /// Daily aggregate for `date`, or [`LookupError::NoDataForDate`] when the
    /// returned series has no entry equal to `date`.
    async fn daily(&self, at: Coordinates, date: &str) -> Result<WeatherReading, LookupError>;
}
