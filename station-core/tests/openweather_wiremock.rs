//! OpenWeather client behaviour against a mock HTTP server.

use std::{net::TcpListener, time::Duration};

use serde_json::json;
use station_core::{ConditionCategory, FetchError, OpenWeatherProvider, WeatherProvider};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn provider(server: &MockServer, key: Option<&str>) -> OpenWeatherProvider {
    OpenWeatherProvider::with_settings(
        key.map(str::to_owned),
        server.uri(),
        Duration::from_secs(5),
    )
    .expect("client should build")
}

fn current_body() -> serde_json::Value {
    json!({
        "cod": 200,
        "name": "London",
        "main": {
            "temp": 11.3,
            "feels_like": 10.1,
            "humidity": 81,
            "pressure": 1013
        },
        "wind": { "speed": 4.6 },
        "visibility": 10000,
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds" }],
        "sys": { "sunrise": 1705305600, "sunset": 1705336200 }
    })
}

fn forecast_item(dt: i64, dt_txt: &str, temp: f64, id: i64) -> serde_json::Value {
    json!({
        "dt": dt,
        "dt_txt": dt_txt,
        "main": { "temp": temp },
        "weather": [{ "id": id, "description": "whatever" }]
    })
}

async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Current weather
// ============================================================================

#[tokio::test]
async fn current_success_parses_all_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let current = provider(&server, Some("KEY")).fetch_current("London").await.unwrap();

    assert_eq!(current.temperature_c, 11.3);
    assert_eq!(current.feels_like_c, 10.1);
    assert_eq!(current.humidity_pct, 81.0);
    assert_eq!(current.pressure_hpa, 1013.0);
    assert_eq!(current.wind_speed_mps, 4.6);
    assert_eq!(current.visibility_m, 10_000.0);
    assert_eq!(current.condition_code, 803);
    assert_eq!(current.description, "broken clouds");
    assert_eq!(current.sunrise.map(|t| t.timestamp()), Some(1_705_305_600));
    assert_eq!(current.sunset.map(|t| t.timestamp()), Some(1_705_336_200));
}

#[tokio::test]
async fn city_with_spaces_is_sent_escaped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider(&server, Some("KEY")).fetch_current("New York").await;
    assert!(result.is_ok());

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains(' '), "query must be escaped: {query}");
}

#[tokio::test]
async fn current_missing_optionals_use_defaults() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(json!({ "cod": 200, "main": { "temp": -2.0 } })),
    )
    .await;

    let current = provider(&server, Some("KEY")).fetch_current("Oslo").await.unwrap();

    assert_eq!(current.feels_like_c, -2.0);
    assert_eq!(current.humidity_pct, 0.0);
    assert_eq!(current.wind_speed_mps, 0.0);
    assert_eq!(current.visibility_m, 0.0);
    assert_eq!(current.condition_code, 800);
    assert_eq!(current.description, "Unknown");
    assert!(current.sunrise.is_none());
    assert!(current.sunset.is_none());
}

#[tokio::test]
async fn current_http_404_is_not_found() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(404).set_body_json(json!({ "cod": "404", "message": "city not found" })),
    )
    .await;

    let err = provider(&server, Some("KEY")).fetch_current("Atlantis").await.unwrap_err();

    assert!(matches!(err, FetchError::NotFound { ref city } if city == "Atlantis"));
}

#[tokio::test]
async fn current_cod_404_in_body_is_not_found() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(json!({ "cod": 404, "message": "city not found" })),
    )
    .await;

    let err = provider(&server, Some("KEY")).fetch_current("Atlantis").await.unwrap_err();

    assert!(matches!(err, FetchError::NotFound { .. }));
}

#[tokio::test]
async fn current_server_error_is_network() {
    let server = MockServer::start().await;
    mount(&server, "/weather", ResponseTemplate::new(500).set_body_string("oops")).await;

    let err = provider(&server, Some("KEY")).fetch_current("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Network(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn current_without_main_is_parse_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/weather",
        ResponseTemplate::new(200).set_body_json(json!({ "cod": 200, "weather": [] })),
    )
    .await;

    let err = provider(&server, Some("KEY")).fetch_current("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn current_non_json_is_parse_error() {
    let server = MockServer::start().await;
    mount(&server, "/weather", ResponseTemplate::new(200).set_body_string("<html>")).await;

    let err = provider(&server, Some("KEY")).fetch_current("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn missing_or_placeholder_key_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(0)
        .mount(&server)
        .await;

    for key in [None, Some("YOUR_API_KEY"), Some("  ")] {
        let provider = provider(&server, key);

        assert!(provider.fetch_current("London").await.unwrap_err().is_auth());
        assert!(provider.fetch_forecast("London").await.unwrap_err().is_auth());
    }
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let provider = OpenWeatherProvider::with_settings(
        Some("KEY".into()),
        format!("http://127.0.0.1:{port}"),
        Duration::from_secs(2),
    )
    .unwrap();

    let err = provider.fetch_current("London").await.unwrap_err();
    assert!(matches!(err, FetchError::Network(ref msg) if !msg.contains("KEY")), "{err:?}");

    let err = provider.fetch_forecast("London").await.unwrap_err();
    assert!(matches!(err, FetchError::Network(ref msg) if !msg.contains("KEY")), "{err:?}");
}

#[tokio::test]
async fn current_out_of_range_condition_id_is_unknown() {
    for id in [70_000, -3] {
        let server = MockServer::start().await;
        let mut body = current_body();
        body["weather"][0]["id"] = json!(id);
        mount(&server, "/weather", ResponseTemplate::new(200).set_body_json(body)).await;

        let current = provider(&server, Some("KEY")).fetch_current("London").await.unwrap();

        assert_eq!(current.condition_code, id);
        assert_eq!(ConditionCategory::from_code(current.condition_code), ConditionCategory::Unknown);
    }
}

// ============================================================================
// Forecast
// ============================================================================

#[tokio::test]
async fn forecast_success_returns_samples_in_order() {
    let server = MockServer::start().await;
    let body = json!({
        "cod": "200",
        "cnt": 2,
        "list": [
            forecast_item(1_705_309_200, "2024-01-15 09:00:00", 4.0, 500),
            forecast_item(1_705_320_000, "2024-01-15 12:00:00", 6.5, 801),
        ]
    });
    mount(&server, "/forecast", ResponseTemplate::new(200).set_body_json(body)).await;

    let samples = provider(&server, Some("KEY")).fetch_forecast("London").await.unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].timestamp, 1_705_309_200);
    assert!(!samples[0].is_midday());
    assert!(samples[1].is_midday());
    assert_eq!(samples[1].temperature_c, 6.5);
    assert_eq!(samples[1].condition_code, 801);
}

#[tokio::test]
async fn forecast_non_success_code_is_empty() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/forecast",
        ResponseTemplate::new(200).set_body_json(json!({ "cod": "401", "list": [] })),
    )
    .await;

    let samples = provider(&server, Some("KEY")).fetch_forecast("London").await.unwrap();
    assert!(samples.is_empty());
}

#[tokio::test]
async fn forecast_non_numeric_code_is_empty() {
    for cod in [json!("abc"), json!(true), json!({ "value": 200 })] {
        let server = MockServer::start().await;
        let body = json!({
            "cod": cod,
            "list": [forecast_item(1_705_320_000, "2024-01-15 12:00:00", 6.5, 801)]
        });
        mount(&server, "/forecast", ResponseTemplate::new(200).set_body_json(body)).await;

        let samples = provider(&server, Some("KEY")).fetch_forecast("London").await.unwrap();
        assert!(samples.is_empty(), "cod {cod} must not count as success");
    }
}

#[tokio::test]
async fn forecast_out_of_range_condition_id_is_kept() {
    let server = MockServer::start().await;
    let body = json!({
        "cod": 200,
        "list": [forecast_item(1_705_320_000, "2024-01-15 12:00:00", 6.5, 70_000)]
    });
    mount(&server, "/forecast", ResponseTemplate::new(200).set_body_json(body)).await;

    let samples = provider(&server, Some("KEY")).fetch_forecast("London").await.unwrap();

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].condition_code, 70_000);
}

#[tokio::test]
async fn forecast_http_error_is_empty() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/forecast",
        ResponseTemplate::new(404).set_body_json(json!({ "cod": "404", "message": "city not found" })),
    )
    .await;

    let samples = provider(&server, Some("KEY")).fetch_forecast("Atlantis").await.unwrap();
    assert!(samples.is_empty());
}

#[tokio::test]
async fn forecast_malformed_item_is_empty() {
    let server = MockServer::start().await;
    let body = json!({
        "cod": "200",
        "list": [
            forecast_item(1_705_309_200, "2024-01-15 09:00:00", 4.0, 500),
            { "dt": 1_705_320_000, "main": { "temp": 6.5 }, "weather": [] }
        ]
    });
    mount(&server, "/forecast", ResponseTemplate::new(200).set_body_json(body)).await;

    let samples = provider(&server, Some("KEY")).fetch_forecast("London").await.unwrap();
    assert!(samples.is_empty());
}

#[tokio::test]
async fn forecast_item_defaults() {
    let server = MockServer::start().await;
    let body = json!({
        "cod": "200",
        "list": [{ "dt": 1_705_320_000, "dt_txt": "2024-01-15 12:00:00", "main": {}, "weather": [] }]
    });
    mount(&server, "/forecast", ResponseTemplate::new(200).set_body_json(body)).await;

    let samples = provider(&server, Some("KEY")).fetch_forecast("London").await.unwrap();

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].temperature_c, 0.0);
    assert_eq!(samples[0].condition_code, 800);
}
