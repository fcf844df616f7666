//! Plain-text rendering of [`AppState`]. Pure: state in, string out.

use std::fmt::{Display, Write};

use chrono::{Local, TimeZone};
use station_core::{
    AppState, ConditionCategory, View,
    display::{
        capitalize_words, format_clock, format_humidity, format_pressure, format_temperature,
        format_visibility, format_wind,
    },
};

pub fn render_current(state: &AppState) -> String {
    render_current_in(state, &Local)
}

pub fn render_current_in<Tz>(state: &AppState, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let unit = state.unit();
    let mut out = String::new();

    match state.view() {
        View::Idle => {
            let _ = writeln!(out, "{}", state.current_city());
            let _ = writeln!(out, "  --°");
        }
        View::Loading { city } => {
            let _ = writeln!(out, "⏳ Loading {city}...");
        }
        View::Failed { message } => {
            let _ = writeln!(out, "❌ Error");
            let _ = writeln!(out, "  {message}");
        }
        View::Ready { weather, updated_at } => {
            let category = ConditionCategory::from_code(weather.condition_code);

            let _ = writeln!(out, "{}", state.current_city());
            let _ = writeln!(
                out,
                "  {}  {}  (feels like {})",
                category.icon(),
                format_temperature(weather.temperature_c, unit),
                format_temperature(weather.feels_like_c, unit),
            );
            let _ = writeln!(out, "  {}", capitalize_words(&weather.description));
            let _ = writeln!(out);
            let _ = writeln!(out, "  Humidity    {}", format_humidity(weather.humidity_pct));
            let _ = writeln!(out, "  Wind        {}", format_wind(weather.wind_speed_mps));
            let _ = writeln!(out, "  Pressure    {}", format_pressure(weather.pressure_hpa));
            let _ = writeln!(out, "  Visibility  {}", format_visibility(weather.visibility_m));
            let _ = writeln!(out, "  Sunrise     {}", format_clock(weather.sunrise, tz));
            let _ = writeln!(out, "  Sunset      {}", format_clock(weather.sunset, tz));
            let _ = writeln!(
                out,
                "  Last updated: {}",
                updated_at.with_timezone(tz).format("%I:%M:%S %p")
            );
        }
    }

    if let Some(status) = state.status() {
        let _ = writeln!(out, "  [{status}]");
    }

    out
}

/// The 5-day strip; empty string when no forecast is available.
pub fn render_forecast(state: &AppState) -> String {
    if state.forecast().is_empty() {
        return String::new();
    }

    let unit = state.unit();
    let mut out = String::from("5-Day Forecast\n");

    for day in state.forecast() {
        let category = ConditionCategory::from_code(day.condition_code);
        let _ = writeln!(
            out,
            "  {:<4} {}  {:>5}  {}",
            day.day,
            category.icon(),
            format_temperature(day.temperature_c, unit),
            category.label(),
        );
    }

    out
}

pub fn render_favorites(state: &AppState) -> String {
    let mut out = String::from("Favorites:");
    for city in state.favorites() {
        let _ = write!(out, " {city} ·");
    }
    out.trim_end_matches(" ·").to_string()
}
