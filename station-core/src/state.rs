//! Explicit application state and the actions that update it.
//!
//! Front ends own one [`AppState`], feed it fetch results through the action
//! methods and render from the read accessors. Nothing here performs I/O.

use chrono::{DateTime, Utc};

use crate::{
    display::capitalize_words,
    error::FetchError,
    model::{CurrentWeather, ForecastDay, TemperatureUnit},
};

/// Cities offered as favorites on every launch.
pub const DEFAULT_FAVORITES: &[&str] = &["London", "New York", "Tokyo", "Paris", "Mumbai"];

/// What the main weather area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Idle,
    Loading { city: String },
    Ready { weather: CurrentWeather, updated_at: DateTime<Utc> },
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone)]
pub struct AppState {
    current_city: String,
    unit: TemperatureUnit,
    favorites: Vec<String>,
    view: View,
    forecast: Vec<ForecastDay>,
    auto_refresh: bool,
    refresh_interval_secs: u64,
    status: Option<String>,
}

impl AppState {
    pub fn new(default_city: &str, refresh_interval_secs: u64) -> Self {
        Self {
            current_city: capitalize_words(default_city),
            unit: TemperatureUnit::default(),
            favorites: DEFAULT_FAVORITES.iter().map(|c| c.to_string()).collect(),
            view: View::Idle,
            forecast: Vec::new(),
            auto_refresh: false,
            refresh_interval_secs: refresh_interval_secs.max(1),
            status: None,
        }
    }

    pub fn current_city(&self) -> &str {
        &self.current_city
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn forecast(&self) -> &[ForecastDay] {
        &self.forecast
    }

    pub fn is_auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn refresh_interval_secs(&self) -> u64 {
        self.refresh_interval_secs
    }

    /// Sets the refresh period, at least one second. An active auto-refresh
    /// reports the new period.
    pub fn set_refresh_interval_secs(&mut self, secs: u64) {
        self.refresh_interval_secs = secs.max(1);
        if self.auto_refresh {
            self.status = Some(self.auto_refresh_message());
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Marks a search as in flight. The current city only changes once the
    /// fetch succeeds.
    pub fn begin_search(&mut self, query: &str) {
        self.view = View::Loading { city: capitalize_words(query) };
    }

    /// Applies the outcome of a current-weather fetch for `query`.
    ///
    /// On success the city becomes current and the old forecast is cleared
    /// until the new one arrives; the status returns to the auto-refresh
    /// notice while that is on. On failure the display switches to an error
    /// and the forecast is cleared.
    pub fn apply_current(&mut self, query: &str, result: Result<CurrentWeather, FetchError>) {
        self.forecast.clear();

        match result {
            Ok(weather) => {
                self.current_city = capitalize_words(query);
                self.view = View::Ready { weather, updated_at: Utc::now() };
                self.status = self.auto_refresh.then(|| self.auto_refresh_message());
            }
            Err(err) => {
                self.view = View::Failed { message: failure_message(query, &err) };
                self.status = Some("Update failed".to_string());
            }
        }
    }

    pub fn apply_forecast(&mut self, days: Vec<ForecastDay>) {
        self.forecast = days;
    }

    /// Switches Celsius/Fahrenheit. Stored values stay metric, so no refetch
    /// is needed.
    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.unit = self.unit.toggled();
        self.unit
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    /// Adds the current city to favorites, keeping insertion order.
    pub fn add_favorite(&mut self) -> FavoriteOutcome {
        let city = self.current_city.clone();

        if self.favorites.iter().any(|f| *f == city) {
            self.status = Some(format!("{city} is already in favorites"));
            FavoriteOutcome::AlreadyPresent
        } else {
            self.status = Some(format!("Added {city} to favorites"));
            self.favorites.push(city);
            FavoriteOutcome::Added
        }
    }

    /// Turns the periodic refresh on. Returns `false` if it already was.
    pub fn enable_auto_refresh(&mut self) -> bool {
        if self.auto_refresh {
            return false;
        }
        self.auto_refresh = true;
        self.status = Some(self.auto_refresh_message());
        true
    }

    /// Turns the periodic refresh off. Returns `false` if it already was.
    pub fn disable_auto_refresh(&mut self) -> bool {
        if !self.auto_refresh {
            return false;
        }
        self.auto_refresh = false;
        self.status = Some("Auto-refresh stopped".to_string());
        true
    }

    fn auto_refresh_message(&self) -> String {
        format!("Auto-refresh enabled (every {}s)", self.refresh_interval_secs)
    }
}

/// Normalizes user input; `None` for an empty search.
pub fn normalize_query(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn failure_message(query: &str, err: &FetchError) -> String {
    match err {
        FetchError::Auth => format!(
            "API key missing! Run `weather-station configure` or set {}.",
            crate::config::API_KEY_ENV
        ),
        _ => format!(
            "Unable to fetch weather data for {}. Please check the city name.",
            capitalize_words(query)
        ),
    }
}
