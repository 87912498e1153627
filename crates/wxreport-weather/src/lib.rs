//! Weather service for Weather Report
//!
//! Fetches current conditions and the 3-hour forecast from OpenWeather and
//! reshapes them into a compact report with one forecast slot per day.

pub mod condition;
pub mod forecast;
pub mod provider;
pub mod report;
pub mod types;

pub use condition::{icon_for, tcase, ConditionCategory};
pub use forecast::{anchor_day, select_daily, ForecastEntry, MAX_FORECAST_DAYS};
pub use provider::WeatherProvider;
pub use report::WeatherService;
pub use types::*;
