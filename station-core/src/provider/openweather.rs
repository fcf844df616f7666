use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::{fmt, time::Duration};
use tracing::{debug, instrument, warn};

use crate::{
    config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, is_placeholder_key},
    error::FetchError,
    model::{CurrentWeather, DEFAULT_CONDITION_CODE, ForecastSample},
};

use super::WeatherProvider;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// Provider against the public endpoint with the default timeout.
    pub fn new(api_key: Option<String>) -> Result<Self, FetchError> {
        Self::with_settings(
            api_key,
            DEFAULT_BASE_URL.to_string(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Provider against a custom endpoint with a request timeout.
    pub fn with_settings(
        api_key: Option<String>,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn api_key(&self) -> Result<&str, FetchError> {
        match self.api_key.as_deref() {
            Some(key) if !is_placeholder_key(key) => Ok(key),
            _ => Err(FetchError::Auth),
        }
    }

    /// GET `{base_url}/{endpoint}` for a city in metric units.
    async fn get(&self, endpoint: &str, city: &str) -> Result<(StatusCode, String), FetchError> {
        let api_key = self.api_key()?;
        let url = format!("{}/{endpoint}", self.base_url);

        debug!(%url, "sending OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        debug!(%status, bytes = body.len(), "received OpenWeather response");

        Ok((status, body))
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn fetch_current(&self, city: &str) -> Result<CurrentWeather, FetchError> {
        let (status, body) = self.get("weather", city).await?;

        let json: Option<Value> = serde_json::from_str(&body).ok();

        let cod = json.as_ref().and_then(response_code);
        if status == StatusCode::NOT_FOUND || cod == Some(Ok(404)) {
            return Err(FetchError::NotFound {
                city: city.to_string(),
            });
        }

        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let json = json.ok_or_else(|| {
            FetchError::Parse("OpenWeather current response is not JSON".to_string())
        })?;

        let parsed: OwCurrentResponse = serde_json::from_value(json)
            .map_err(|e| FetchError::Parse(format!("OpenWeather current JSON: {e}")))?;

        Ok(parsed.into())
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastSample>, FetchError> {
        let (status, body) = self.get("forecast", city).await?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "OpenWeather forecast request failed");
            return Ok(Vec::new());
        }

        let json: Value = match serde_json::from_str(&body) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "OpenWeather forecast response is not JSON");
                return Ok(Vec::new());
            }
        };

        match response_code(&json) {
            None | Some(Ok(200)) => {}
            Some(code) => {
                warn!(?code, "OpenWeather forecast reported a non-success code");
                return Ok(Vec::new());
            }
        }

        match serde_json::from_value::<OwForecastResponse>(json) {
            Ok(parsed) => Ok(parsed.list.into_iter().map(ForecastSample::from).collect()),
            Err(err) => {
                warn!(error = %err, "Failed to parse OpenWeather forecast JSON");
                Ok(Vec::new())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default, deserialize_with = "lenient_code")]
    id: Option<i64>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    wind: Option<OwWind>,
    sys: Option<OwSys>,
    #[serde(default)]
    weather: Vec<OwWeather>,
    visibility: Option<f64>,
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(res: OwCurrentResponse) -> Self {
        let temperature_c = res.main.temp.unwrap_or(0.0);
        let first = res.weather.into_iter().next();
        let (condition_code, description) = match first {
            Some(w) => (
                w.id.unwrap_or(DEFAULT_CONDITION_CODE),
                w.description.unwrap_or_else(|| "Unknown".to_string()),
            ),
            None => (DEFAULT_CONDITION_CODE, "Unknown".to_string()),
        };

        CurrentWeather {
            temperature_c,
            feels_like_c: res.main.feels_like.unwrap_or(temperature_c),
            humidity_pct: res.main.humidity.unwrap_or(0.0),
            wind_speed_mps: res.wind.and_then(|w| w.speed).unwrap_or(0.0),
            pressure_hpa: res.main.pressure.unwrap_or(0.0),
            visibility_m: res.visibility.unwrap_or(0.0),
            condition_code,
            description,
            sunrise: res.sys.as_ref().and_then(|s| s.sunrise).and_then(unix_to_utc),
            sunset: res.sys.as_ref().and_then(|s| s.sunset).and_then(unix_to_utc),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl From<OwForecastEntry> for ForecastSample {
    fn from(entry: OwForecastEntry) -> Self {
        ForecastSample {
            timestamp: entry.dt,
            time_text: entry.dt_txt,
            temperature_c: entry.main.temp.unwrap_or(0.0),
            condition_code: entry
                .weather
                .first()
                .and_then(|w| w.id)
                .unwrap_or(DEFAULT_CONDITION_CODE),
        }
    }
}

/// The `cod` field, which OpenWeather sends either as a number or a string.
///
/// `None` when absent; `Some(Err(raw))` when present but not an integer, which
/// callers must not mistake for success.
fn response_code(body: &Value) -> Option<Result<i64, String>> {
    let cod = body.get("cod")?;
    Some(as_code(cod).ok_or_else(|| cod.to_string()))
}

/// Integer value of a number or numeric string; floats are truncated.
fn as_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Condition ids of any integer size, or anything unreadable as absent, so
/// an odd id never fails the whole response.
fn lenient_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_code))
}

/// Zero means "not reported".
fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    if ts == 0 {
        return None;
    }
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
