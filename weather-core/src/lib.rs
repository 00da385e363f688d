//! Core library for the `weather-mcp` server.
//!
//! This crate defines:
//! - Configuration handling
//! - The geocode-then-fetch lookup pipeline and its failure outcomes
//! - Provider traits and the Open-Meteo implementation
//! - The weather code table and shared models
//!
//! It is used by `weather-mcp`, but can also be reused by other binaries or services.

pub mod codes;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::{LookupError, QueryError, Upstream};
pub use lookup::{WeatherLookup, render};
pub use model::{Coordinates, DATE_PATTERN, WeatherQuery, WeatherReading, WeatherResult};
pub use provider::{Geocoder, OpenMeteoProvider, WeatherSource};
