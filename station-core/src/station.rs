//! The search flow: current conditions first, forecast only after success.

use std::{fmt::Display, sync::Arc};

use chrono::{Local, TimeZone};
use tracing::{info, warn};

use crate::{
    error::FetchError,
    forecast::reduce_forecast,
    model::{CurrentWeather, ForecastDay},
    provider::WeatherProvider,
    state::AppState,
};

#[derive(Debug, Clone)]
pub struct WeatherStation {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherStation {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider: Arc::from(provider),
        }
    }

    pub async fn current(&self, city: &str) -> Result<CurrentWeather, FetchError> {
        self.provider.fetch_current(city).await
    }

    /// Reduced forecast for `city` in local time. Failures are logged and
    /// yield an empty forecast.
    pub async fn forecast(&self, city: &str) -> Vec<ForecastDay> {
        self.forecast_in(city, &Local).await
    }

    pub async fn forecast_in<Tz>(&self, city: &str, tz: &Tz) -> Vec<ForecastDay>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self.provider.fetch_forecast(city).await {
            Ok(samples) => reduce_forecast(&samples, tz),
            Err(err) => {
                warn!(error = %err, city, "forecast unavailable");
                Vec::new()
            }
        }
    }

    /// Fetches current conditions for `query` into `state`.
    ///
    /// Returns `true` when the fetch succeeded and a forecast should follow.
    pub async fn search_current(&self, state: &mut AppState, query: &str) -> bool {
        state.begin_search(query);

        let result = self.current(query).await;
        let ok = result.is_ok();
        if let Err(err) = &result {
            warn!(error = %err, query, "current weather fetch failed");
        } else {
            info!(query, "current weather updated");
        }

        state.apply_current(query, result);
        ok
    }

    /// Fetches the forecast for the state's current city.
    pub async fn load_forecast(&self, state: &mut AppState) {
        let city = state.current_city().to_string();
        let days = self.forecast(&city).await;
        state.apply_forecast(days);
    }

    /// Full search: current conditions, then the forecast if that succeeded.
    pub async fn search(&self, state: &mut AppState, query: &str) {
        if self.search_current(state, query).await {
            self.load_forecast(state).await;
        }
    }
}
