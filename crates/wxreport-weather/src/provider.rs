//! OpenWeather 2.5 data API client.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use wxreport_core::WeatherConfig;

use crate::forecast::ForecastEntry;
use crate::types::{CurrentResponse, ForecastResponse, WeatherError};

const CURRENT_ENDPOINT: &str = "weather";
const FORECAST_ENDPOINT: &str = "forecast";

#[derive(Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    units: String,
}

impl std::fmt::Debug for WeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherProvider")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            units: config.units.clone(),
        })
    }

    /// Current conditions for a city.
    ///
    /// Any non-success status is reported as [`WeatherError::NotFound`].
    #[instrument(skip(self), level = "info")]
    pub async fn current(&self, city: &str) -> Result<CurrentResponse, WeatherError> {
        let response = self.get(CURRENT_ENDPOINT, city).await?;

        let status = response.status();
        if !status.is_success() {
            tracing::info!("Current conditions returned status {}", status);
            return Err(WeatherError::NotFound {
                status: status.as_u16(),
            });
        }

        Self::decode(response).await
    }

    /// 3-hour forecast slots for a city.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
        let response = self.get(FORECAST_ENDPOINT, city).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: ForecastResponse = Self::decode(response).await?;
        let entries: Vec<ForecastEntry> = body
            .list
            .unwrap_or_default()
            .into_iter()
            .map(ForecastEntry::from)
            .collect();

        tracing::debug!("Forecast returned {} slots", entries.len());
        Ok(entries)
    }

    async fn get(&self, endpoint: &str, city: &str) -> Result<reqwest::Response, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("units", self.units.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, WeatherError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
