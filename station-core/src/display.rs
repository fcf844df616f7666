//! Formatting helpers shared by front ends.

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};

use crate::model::TemperatureUnit;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Converts a metric temperature into `unit`, unrounded.
pub fn convert_temperature(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
    }
}

/// Renders a metric temperature in `unit`, rounded to a whole degree.
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    let value = convert_temperature(celsius, unit).round();
    // Avoid printing "-0".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.0}{}", unit.symbol())
}

pub fn format_visibility(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

pub fn format_wind(speed_mps: f64) -> String {
    format!("{speed_mps:.1} m/s")
}

pub fn format_humidity(pct: f64) -> String {
    format!("{:.0}%", pct.round())
}

pub fn format_pressure(hpa: f64) -> String {
    format!("{:.0} hPa", hpa.round())
}

/// Wall-clock time like `06:42 AM` in `tz`, or `--` when unknown.
pub fn format_clock<Tz>(instant: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match instant {
        Some(at) => at.with_timezone(tz).format("%I:%M %p").to_string(),
        None => "--".to_string(),
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
pub fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Display category of a provider condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCategory {
    SevereStorm,
    LightPrecipitation,
    Rain,
    Snow,
    AtmosphericHaze,
    Clear,
    FewClouds,
    ScatteredClouds,
    Overcast,
    Unknown,
}

impl ConditionCategory {
    /// Maps a condition code to its band. Codes outside every band are
    /// [`ConditionCategory::Unknown`].
    pub fn from_code(code: i64) -> Self {
        match code {
            200..=299 => ConditionCategory::SevereStorm,
            300..=399 => ConditionCategory::LightPrecipitation,
            500..=599 => ConditionCategory::Rain,
            600..=699 => ConditionCategory::Snow,
            700..=799 => ConditionCategory::AtmosphericHaze,
            800 => ConditionCategory::Clear,
            801 => ConditionCategory::FewClouds,
            802 => ConditionCategory::ScatteredClouds,
            803..=899 => ConditionCategory::Overcast,
            _ => ConditionCategory::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConditionCategory::SevereStorm => "severe-storm",
            ConditionCategory::LightPrecipitation => "light-precipitation",
            ConditionCategory::Rain => "rain",
            ConditionCategory::Snow => "snow",
            ConditionCategory::AtmosphericHaze => "atmospheric-haze",
            ConditionCategory::Clear => "clear",
            ConditionCategory::FewClouds => "few-clouds",
            ConditionCategory::ScatteredClouds => "scattered-clouds",
            ConditionCategory::Overcast => "overcast",
            ConditionCategory::Unknown => "unknown",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ConditionCategory::SevereStorm => "⛈️",
            ConditionCategory::LightPrecipitation => "🌦️",
            ConditionCategory::Rain => "🌧️",
            ConditionCategory::Snow => "❄️",
            ConditionCategory::AtmosphericHaze => "🌫️",
            ConditionCategory::Clear => "☀️",
            ConditionCategory::FewClouds => "🌤️",
            ConditionCategory::ScatteredClouds => "⛅",
            ConditionCategory::Overcast => "☁️",
            ConditionCategory::Unknown => "🌡️",
        }
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
