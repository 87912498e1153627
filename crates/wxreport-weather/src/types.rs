use serde::{Deserialize, Serialize};

/// One element of the provider's `weather` array
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCondition {
    pub main: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMain {
    pub temp: Option<f64>,
    pub humidity: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiWind {
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSys {
    pub country: Option<String>,
}

/// Body of the "current weather by city name" endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentResponse {
    pub weather: Option<Vec<ApiCondition>>,
    /// Offset from UTC in seconds
    pub timezone: Option<i64>,
    pub main: Option<ApiMain>,
    pub wind: Option<ApiWind>,
    pub sys: Option<ApiSys>,
    pub name: Option<String>,
    pub dt: Option<i64>,
}

/// One 3-hour slot of the forecast endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiForecastSlot {
    pub dt: Option<i64>,
    pub dt_txt: Option<String>,
    pub main: Option<ApiMain>,
    pub weather: Option<Vec<ApiCondition>>,
}

/// Body of the "5 day / 3 hour forecast by city name" endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    pub list: Option<Vec<ApiForecastSlot>>,
}

/// First entry of a `weather` array; a missing or empty array yields `None`.
pub fn primary_condition(weather: &Option<Vec<ApiCondition>>) -> Option<&ApiCondition> {
    weather.as_deref().and_then(|w| w.first())
}

/// Current conditions plus the per-day forecast, as served to the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub date_ts: i64,
    pub timezone_shift: i64,
    pub temp: f64,
    pub humidity: i64,
    pub wind: f64,
    pub condition: String,
    pub condition_desc: String,
    pub icon: String,
    pub forecast: Vec<ForecastDay>,
}

/// Representative slot for one upcoming day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date_ts: i64,
    pub temp: f64,
    pub condition: String,
    pub icon: String,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("No city provided")]
    MissingCity,
    #[error("City not found (upstream status {status})")]
    NotFound { status: u16 },
    #[error("Upstream returned status {status}")]
    Upstream { status: u16 },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        WeatherError::Parse(format!("JSON parse error: {}", e))
    }
}

impl WeatherError {
    /// Short message placed in the `error` field of API responses.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::MissingCity => "No city provided",
            WeatherError::NotFound { .. } => "Not Found",
            WeatherError::Upstream { .. } | WeatherError::Network(_) | WeatherError::Parse(_) => {
                "Parsing failed"
            }
        }
    }

    /// Diagnostic text for failures that are not the caller's fault.
    pub fn details(&self) -> Option<String> {
        match self {
            WeatherError::MissingCity | WeatherError::NotFound { .. } => None,
            _ => Some(self.to_string()),
        }
    }
}
