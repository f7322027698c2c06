//! Core library for the `skycast` terminal weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its OpenWeather implementation
//! - Shared domain models (current conditions, forecast entries)
//! - Pure view calculations (backdrop selection, temperature trend)
//!
//! It is used by `skycast-tui`, but can also be reused by other binaries or services.

pub mod backdrop;
pub mod config;
pub mod model;
pub mod provider;
pub mod trend;

pub use config::Config;
pub use model::{CityWeather, Condition, CurrentConditions, ForecastEntry};
pub use provider::{FetchError, OpenWeatherProvider, WeatherProvider};
pub use trend::TemperatureTrend;
