//! Builds the served weather report from the provider's two endpoints.

use tracing::instrument;
use wxreport_core::WeatherConfig;

use crate::condition::{icon_for, tcase};
use crate::forecast::{anchor_day, select_daily, ForecastEntry};
use crate::provider::WeatherProvider;
use crate::types::{primary_condition, CurrentResponse, ForecastDay, WeatherError, WeatherReport};

/// Current conditions are required; the forecast is best effort.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: WeatherProvider,
}

impl WeatherService {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Ok(Self::with_provider(WeatherProvider::new(config)?))
    }

    pub fn with_provider(provider: WeatherProvider) -> Self {
        Self { provider }
    }

    /// Fetch and shape the report for `city`.
    ///
    /// A blank city fails before any upstream call. Forecast transport
    /// failures and error statuses degrade to an empty forecast.
    #[instrument(skip(self), level = "info")]
    pub async fn report(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::MissingCity);
        }

        let current = self.provider.current(city).await?;
        let mut report = shape_current(&current, city);

        let entries = match self.provider.forecast(city).await {
            Ok(entries) => entries,
            Err(e @ WeatherError::Parse(_)) => return Err(e),
            Err(e) => {
                tracing::warn!("Forecast unavailable for {}: {}", city, e);
                Vec::new()
            }
        };

        report.forecast = shape_forecast(&entries, report.date_ts, report.timezone_shift)?;

        tracing::info!(
            "Report for {}, {}: {} forecast days",
            report.city,
            report.country,
            report.forecast.len()
        );
        Ok(report)
    }
}

/// Flatten the current-conditions body; missing fields take neutral defaults.
pub fn shape_current(current: &CurrentResponse, requested_city: &str) -> WeatherReport {
    let condition_src = primary_condition(&current.weather);

    let condition = tcase(
        condition_src
            .and_then(|c| c.main.as_deref())
            .unwrap_or_default(),
    );
    let description = condition_src
        .and_then(|c| c.description.as_deref())
        .filter(|d| !d.is_empty())
        .unwrap_or(condition.as_str());
    let condition_desc = tcase(description);
    let icon = icon_for(&condition).to_string();

    let main = current.main.as_ref();

    WeatherReport {
        city: current
            .name
            .clone()
            .unwrap_or_else(|| requested_city.to_string()),
        country: current
            .sys
            .as_ref()
            .and_then(|s| s.country.clone())
            .unwrap_or_default(),
        date_ts: current.dt.unwrap_or(0),
        timezone_shift: current.timezone.unwrap_or(0),
        temp: main.and_then(|m| m.temp).unwrap_or(0.0),
        humidity: main.and_then(|m| m.humidity).unwrap_or(0),
        wind: current.wind.as_ref().and_then(|w| w.speed).unwrap_or(0.0),
        condition,
        condition_desc,
        icon,
        forecast: Vec::new(),
    }
}

/// Pick one slot per day after the location's current day and shape it.
pub fn shape_forecast(
    entries: &[ForecastEntry],
    now_ts: i64,
    tz_shift: i64,
) -> Result<Vec<ForecastDay>, WeatherError> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let anchor = anchor_day(now_ts, tz_shift)?;
    let days = select_daily(entries, &anchor)?
        .into_iter()
        .map(|entry| {
            let condition = tcase(&entry.condition_main);
            ForecastDay {
                date_ts: entry.timestamp,
                temp: entry.temperature,
                icon: icon_for(&condition).to_string(),
                condition,
            }
        })
        .collect();

    Ok(days)
}
