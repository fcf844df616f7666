//! Core library for the `weather-station` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - Forecast reduction (one representative sample per day)
//! - Explicit application state and formatting helpers
//!
//! It is used by `station-cli`, but can also be reused by other front ends.

pub mod config;
pub mod display;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod state;
pub mod station;

pub use config::Config;
pub use display::ConditionCategory;
pub use error::FetchError;
pub use forecast::{reduce_forecast, reduce_forecast_local};
pub use model::{CurrentWeather, ForecastDay, ForecastSample, TemperatureUnit};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use state::{AppState, FavoriteOutcome, View};
pub use station::WeatherStation;
