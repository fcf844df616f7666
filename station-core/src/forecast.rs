//! Reduction of 3-hour forecast records to one entry per day.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use tracing::warn;

use crate::model::{ForecastDay, ForecastSample};

/// Number of days shown in the forecast strip.
pub const FORECAST_DAYS: usize = 5;

/// Picks one representative sample per day.
///
/// Samples are keyed by short weekday name in `tz`. The first sample seen for
/// a day is kept unless a later one is the midday sample, which then replaces
/// it. Days keep first-seen order. When more than [`FORECAST_DAYS`] days are
/// present the first (partial, current) day is dropped and the next five are
/// returned.
///
/// Keying by weekday name merges days a week apart, which is fine for the
/// provider's 5-day window but not for longer horizons.
pub fn reduce_forecast<Tz>(samples: &[ForecastSample], tz: &Tz) -> Vec<ForecastDay>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut days: Vec<(String, &ForecastSample)> = Vec::new();

    for sample in samples {
        let Some(utc) = DateTime::from_timestamp(sample.timestamp, 0) else {
            warn!(timestamp = sample.timestamp, "skipping forecast sample with invalid timestamp");
            continue;
        };
        let day = utc.with_timezone(tz).format("%a").to_string();

        match days.iter_mut().find(|(key, _)| *key == day) {
            Some(slot) if sample.is_midday() => slot.1 = sample,
            Some(_) => {}
            None => days.push((day, sample)),
        }
    }

    let reduced: Vec<ForecastDay> = days
        .into_iter()
        .map(|(day, sample)| ForecastDay {
            day,
            temperature_c: sample.temperature_c,
            condition_code: sample.condition_code,
        })
        .collect();

    if reduced.len() > FORECAST_DAYS {
        reduced[1..=FORECAST_DAYS].to_vec()
    } else {
        reduced
    }
}

/// [`reduce_forecast`] in the system's local time zone.
pub fn reduce_forecast_local(samples: &[ForecastSample]) -> Vec<ForecastDay> {
    reduce_forecast(samples, &Local)
}
