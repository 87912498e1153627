//! Router and handlers for the landing page and the JSON API.

use axum::{
    extract::{RawQuery, State},
    response::Html,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::form_urlencoded;
use wxreport_core::{AppError, Config};
use wxreport_weather::{WeatherReport, WeatherService};

use crate::error::ApiError;
use crate::page::{render_landing, LandingSnapshot};

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<WeatherService>,
    pub app_name: Arc<str>,
}

impl AppState {
    pub fn new(weather: WeatherService, app_name: &str) -> Self {
        Self {
            weather: Arc::new(weather),
            app_name: Arc::from(app_name),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let weather = WeatherService::new(&config.weather).map_err(anyhow::Error::from)?;
        Ok(Self::new(weather, &config.server.app_name))
    }
}

/// Query parameters of `/api/weather`
#[derive(Debug, Default, PartialEq)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

impl WeatherQuery {
    /// Parse a raw query string. Repeated keys keep their first value.
    pub fn parse(raw: Option<&str>) -> Self {
        let city = raw.and_then(|raw| {
            form_urlencoded::parse(raw.as_bytes())
                .find(|(key, _)| key == "city")
                .map(|(_, value)| value.into_owned())
        });
        Self { city }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NowResponse {
    pub now_utc: String,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/now", get(now_handler))
        .route("/api/weather", get(weather_handler))
        .with_state(state)
}

/// GET / - landing page with a placeholder snapshot
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_landing(&state.app_name, &LandingSnapshot::placeholder()))
}

/// GET /api/now - server clock, RFC 3339 with microseconds
async fn now_handler() -> Json<NowResponse> {
    Json(NowResponse {
        now_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
    })
}

/// GET /api/weather?city=<name>
async fn weather_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<WeatherReport>, ApiError> {
    let city = WeatherQuery::parse(raw.as_deref()).city.unwrap_or_default();
    let report = state.weather.report(&city).await?;
    Ok(Json(report))
}
