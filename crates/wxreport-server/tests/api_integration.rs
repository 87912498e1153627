//! End-to-end tests for the HTTP API.
//!
//! The router is served on an ephemeral port and the upstream provider is a
//! wiremock server.

use reqwest::StatusCode;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wxreport_core::{Config, ServerConfig, WeatherConfig};
use wxreport_server::{serve, AppState, ErrorBody, NowResponse};
use wxreport_weather::WeatherReport;

async fn spawn_app(upstream: &MockServer) -> String {
    let config = Config {
        server: ServerConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            app_name: "Weather Report".to_string(),
        },
        weather: WeatherConfig {
            api_key: "test-key".to_string(),
            base_url: upstream.uri(),
            units: "metric".to_string(),
            timeout_secs: 2,
        },
    };

    let state = AppState::from_config(&config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = serve(listener, state).await;
    });

    format!("http://{}", addr)
}

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "weather": [{"main": "Clear", "description": "clear sky"}],
        "main": {"temp": 24.6, "humidity": 40},
        "wind": {"speed": 2.1},
        "sys": {"country": "ES"},
        "timezone": 3600,
        "name": "Madrid",
        "dt": 1709330400
    })
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "list": [
            {"dt": 1709337600, "main": {"temp": 10.0}, "weather": [{"main": "Clear"}], "dt_txt": "2024-03-02 00:00:00"},
            {"dt": 1709380800, "main": {"temp": 18.0}, "weather": [{"main": "Clouds"}], "dt_txt": "2024-03-02 12:00:00"},
            {"dt": 1709424000, "main": {"temp": 12.0}, "weather": [{"main": "Clear"}], "dt_txt": "2024-03-03 00:00:00"},
            {"dt": 1709467200, "main": {"temp": 19.0}, "weather": [{"main": "Drizzle"}], "dt_txt": "2024-03-03 12:00:00"}
        ]
    })
}

#[tokio::test]
async fn test_missing_city_is_bad_request() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(0)
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let client = reqwest::Client::new();

    for url in [
        format!("{}/api/weather", base),
        format!("{}/api/weather?city=", base),
        format!("{}/api/weather?city=%20%20", base),
    ] {
        let response = client.get(&url).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "url {}", url);

        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.error, "No city provided");
        assert!(body.details.is_none());
    }
}

#[tokio::test]
async fn test_unknown_city_is_not_found() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let response = reqwest::get(format!("{}/api/weather?city=Qwertyville", base))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Not Found");
}

#[tokio::test]
async fn test_weather_success() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Madrid"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let response = reqwest::get(format!("{}/api/weather?city=Madrid", base))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report: WeatherReport = response.json().await.unwrap();
    assert_eq!(report.city, "Madrid");
    assert_eq!(report.country, "ES");
    assert_eq!(report.condition, "Clear");
    assert_eq!(report.condition_desc, "Clear sky");
    assert_eq!(report.icon, "clear.svg");

    assert_eq!(report.forecast.len(), 2);
    assert_eq!(report.forecast[0].date_ts, 1_709_380_800);
    assert_eq!(report.forecast[0].condition, "Clouds");
    assert_eq!(report.forecast[0].icon, "clouds.svg");
    assert_eq!(report.forecast[1].temp, 19.0);
    assert_eq!(report.forecast[1].icon, "drizzle.svg");
}

#[tokio::test]
async fn test_forecast_outage_still_returns_current() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let response = reqwest::get(format!("{}/api/weather?city=Madrid", base))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report: WeatherReport = response.json().await.unwrap();
    assert_eq!(report.temp, 24.6);
    assert!(report.forecast.is_empty());
}

#[tokio::test]
async fn test_malformed_upstream_is_server_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": {"temp": "warm"}
        })))
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let response = reqwest::get(format!("{}/api/weather?city=Madrid", base))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Parsing failed");
    assert!(body.details.is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn test_repeated_city_uses_first_value() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Madrid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Madrid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let response = reqwest::get(format!("{}/api/weather?city=Madrid&city=Rome", base))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report: WeatherReport = response.json().await.unwrap();
    assert_eq!(report.city, "Madrid");
    assert_eq!(report.forecast.len(), 2);
}

#[tokio::test]
async fn test_current_timeout_is_server_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_body())
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(0)
        .mount(&upstream)
        .await;

    let base = spawn_app(&upstream).await;
    let response = reqwest::get(format!("{}/api/weather?city=Madrid", base))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));

    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Parsing failed");
    assert!(body.details.is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn test_now_is_utc_rfc3339() {
    let upstream = MockServer::start().await;
    let base = spawn_app(&upstream).await;

    let response = reqwest::get(format!("{}/api/now", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: NowResponse = response.json().await.unwrap();
    assert!(body.now_utc.ends_with("+00:00"), "got {}", body.now_utc);
    let parsed = chrono::DateTime::parse_from_rfc3339(&body.now_utc).unwrap();
    assert_eq!(parsed.offset().local_minus_utc(), 0);
}

#[tokio::test]
async fn test_landing_page() {
    let upstream = MockServer::start().await;
    let base = spawn_app(&upstream).await;

    let response = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let html = response.text().await.unwrap();
    assert!(html.contains("Weather Report"));
    assert!(html.contains(r#"data-icon="clear.svg""#));
    assert!(!html.contains("/static/"));
}
