pub mod demo;
pub mod farm_api;
pub mod openweathermap;

pub use demo::DemoDataSource;
pub use farm_api::FarmApiClient;
pub use openweathermap::OpenWeatherMapClient;

use crate::error::Result;
use crate::models::{
    AstronomicalSnapshot, SoilSensorReading, TaskSnapshot, VegetationReading, WeatherConditions,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Where field snapshots come from.
///
/// `Ok(None)` means the source has nothing for this field; `Err` means the
/// fetch failed or the payload was unusable. Callers treat both the same.
#[async_trait]
pub trait FieldDataSource: Send + Sync {
    /// Human-readable name for logging
    fn source_name(&self) -> &str;

    /// Latest vegetation-index reading, or the one for `date`
    async fn fetch_vegetation(
        &self,
        field_id: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<VegetationReading>>;

    async fn fetch_soil_sensors(&self, field_id: &str) -> Result<Vec<SoilSensorReading>>;

    async fn fetch_weather(&self, field_id: &str) -> Result<Option<WeatherConditions>>;

    async fn fetch_tasks(&self, field_id: &str) -> Result<Option<TaskSnapshot>>;

    /// Farming-calendar entry for today, or for `date`
    async fn fetch_astronomical(&self, date: Option<NaiveDate>)
        -> Result<Option<AstronomicalSnapshot>>;

    async fn test_connection(&self) -> Result<bool>;
}

/// A dedicated current-conditions provider that replaces the data source's
/// own weather when configured.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    async fn current_weather(&self, field_id: &str) -> Result<Option<WeatherConditions>>;

    async fn test_connection(&self) -> Result<bool>;
}
