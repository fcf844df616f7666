use crate::{
    Config,
    error::FetchError,
    model::{CurrentWeather, ForecastSample},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`.
    async fn fetch_current(&self, city: &str) -> Result<CurrentWeather, FetchError>;

    /// Raw 3-hour forecast records for `city`.
    ///
    /// An unusable upstream answer yields an empty list rather than an error;
    /// only a missing key or a transport failure is reported.
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastSample>, FetchError>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing key is not an error here; it surfaces as [`FetchError::Auth`] on
/// the first fetch so the front end can show it like any other failure.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::with_settings(
        config.api_key().map(str::to_owned),
        config.base_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;

    Ok(Box::new(provider))
}
