use super::WeatherProvider;
use crate::config::OpenWeatherMapConfig;
use crate::error::{FieldScoreError, Result};
use crate::models::{WeatherConditions, WeatherSource};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Current conditions for a single configured location.
///
/// Fields are small relative to a weather cell, so every field shares the
/// same observation.
pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
    base_url: String,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
    #[serde(default)]
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            config,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Carries the API key, so it must never reach a log line
    fn current_url(&self) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/weather", self.base_url),
            [
                ("lat", self.config.latitude.to_string()),
                ("lon", self.config.longitude.to_string()),
                ("appid", self.config.api_key.clone()),
                ("units", "metric".to_string()),
            ],
        )
        .map_err(|e| FieldScoreError::Config(format!("Invalid OpenWeatherMap URL: {}", e)))
    }

    async fn send(&self) -> Result<reqwest::Response> {
        // reqwest errors embed the request URL; strip it to keep the key out
        self.client
            .get(self.current_url()?)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                FieldScoreError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })
    }

    /// Fetch current conditions from OpenWeatherMap
    pub async fn fetch_current(&self) -> Result<WeatherConditions> {
        let response = self.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FieldScoreError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let owm_response: OwmCurrentResponse = response.json().await.map_err(|e| {
            FieldScoreError::InvalidData(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e.without_url()
            ))
        })?;

        convert_response(owm_response)
    }
}

fn convert_response(response: OwmCurrentResponse) -> Result<WeatherConditions> {
    let OwmMain { temp, humidity } = response.main;
    if !temp.is_finite() || !(0.0..=100.0).contains(&humidity) {
        return Err(FieldScoreError::InvalidData(format!(
            "OpenWeatherMap reading out of range: {}°C, {}%",
            temp, humidity
        )));
    }

    Ok(WeatherConditions {
        temperature_c: temp,
        humidity_percent: humidity,
        source: WeatherSource::OpenWeatherMap,
        observed_at: response.dt.and_then(|ts| DateTime::from_timestamp(ts, 0)),
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapClient {
    fn provider_name(&self) -> &str {
        "OpenWeatherMap"
    }

    async fn current_weather(&self, _field_id: &str) -> Result<Option<WeatherConditions>> {
        self.fetch_current().await.map(Some)
    }

    async fn test_connection(&self) -> Result<bool> {
        Ok(self.send().await?.status().is_success())
    }
}
