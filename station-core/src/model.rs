use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Condition code used when the provider omits one (clear sky).
pub const DEFAULT_CONDITION_CODE: i64 = 800;

/// Snapshot of current conditions for one city, metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,
    pub pressure_hpa: f64,
    pub visibility_m: f64,
    pub condition_code: i64,
    pub description: String,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

/// One raw 3-hour forecast record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Epoch seconds.
    pub timestamp: i64,
    /// Provider-formatted time, e.g. `2024-01-15 12:00:00`.
    pub time_text: String,
    pub temperature_c: f64,
    pub condition_code: i64,
}

impl ForecastSample {
    /// Whether this is the provider's canonical midday sample.
    pub fn is_midday(&self) -> bool {
        self.time_text.contains("12:00:00")
    }
}

/// Representative forecast for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Short weekday name, e.g. `Mon`.
    pub day: String,
    pub temperature_c: f64,
    pub condition_code: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }
}
