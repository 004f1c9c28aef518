use super::FieldDataSource;
use crate::config::FarmApiConfig;
use crate::error::{FieldScoreError, Result};
use crate::models::{
    AstronomicalSnapshot, FieldTask, HealthStatus, LocalizedText, SoilSensorReading, TaskSnapshot,
    TaskStatus, Trend, VegetationReading, WeatherConditions, WeatherSource,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// REST client for the farm management backend
pub struct FarmApiClient {
    client: reqwest::Client,
    config: FarmApiConfig,
}

// Farm API response structures

/// List endpoints answer either a bare array or `{"data": [...]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VegetationDto {
    #[serde(default)]
    field_id: Option<String>,
    #[serde(default, alias = "date", alias = "acquired_at")]
    captured_at: Option<DateTime<Utc>>,
    #[serde(alias = "mean_ndvi", alias = "ndvi")]
    mean_index: Option<f64>,
    #[serde(default)]
    health_status: Option<String>,
    #[serde(default, alias = "trend_hint")]
    trend: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SensorReadingDto {
    #[serde(alias = "id")]
    sensor_id: IdDto,
    #[serde(alias = "moisture", alias = "moisture_percent")]
    value: f64,
    #[serde(default, alias = "timestamp")]
    recorded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct WeatherDto {
    #[serde(alias = "temperature_c", alias = "temp")]
    temperature: f64,
    #[serde(alias = "humidity_percent")]
    humidity: f64,
    #[serde(default, alias = "timestamp")]
    observed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdDto {
    Num(i64),
    Str(String),
}

impl IdDto {
    fn into_string(self) -> String {
        match self {
            IdDto::Num(n) => n.to_string(),
            IdDto::Str(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TaskDto {
    id: IdDto,
    #[serde(default)]
    title: String,
    status: String,
    #[serde(default)]
    due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct AstronomicalDto {
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default, alias = "farming_score", alias = "overall_score")]
    overall_farming_score: Option<f64>,
    #[serde(default)]
    moon_phase: Option<MoonPhaseDto>,
    #[serde(default)]
    lunar_mansion: Option<LunarMansionDto>,
    #[serde(default)]
    top_recommendation: Option<AdviceDto>,
}

#[derive(Debug, Deserialize)]
struct MoonPhaseDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "favorable_for_farming", alias = "is_favorable")]
    favorable: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct LunarMansionDto {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "farming_score")]
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AdviceDto {
    Localized { en: String, th: Option<String> },
    Plain(String),
}

impl FarmApiClient {
    pub fn new(config: FarmApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self { client, config })
    }

    /// Base URL plus one percent-encoded path segment per entry, so a field
    /// id containing `/`, `?` or `#` stays inside its own segment.
    fn build_url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&self.config.url)
            .map_err(|e| FieldScoreError::Config(format!("Invalid farm API URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| FieldScoreError::Config("Farm API URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    fn get(&self, url: Url) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.config.token.is_empty() {
            request
        } else {
            request.header("Authorization", format!("Bearer {}", self.config.token))
        }
    }

    /// GET a JSON resource. 404 and 204 map to `None`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let url = self.build_url(segments, query)?;
        let path = url.path().to_string();

        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| FieldScoreError::DataSourceUnavailable(format!("Farm API: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FieldScoreError::DataSourceUnavailable(format!(
                "Farm API {} returned {}: {}",
                path, status, body
            )));
        }

        let body = response.text().await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }

        let parsed = serde_json::from_str(&body).map_err(|e| {
            FieldScoreError::InvalidData(format!("Failed to parse Farm API {}: {}", path, e))
        })?;

        Ok(Some(parsed))
    }
}

#[async_trait]
impl FieldDataSource for FarmApiClient {
    fn source_name(&self) -> &str {
        "Farm API"
    }

    async fn fetch_vegetation(
        &self,
        field_id: &str,
        date: Option<NaiveDate>,
    ) -> Result<Option<VegetationReading>> {
        let dto: Option<VegetationDto> = match date {
            Some(d) => {
                let query = [("date", d.to_string())];
                self.get_json(&["fields", field_id, "vegetation"], &query).await?
            }
            None => self.get_json(&["fields", field_id, "vegetation", "latest"], &[]).await?,
        };

        dto.map(|d| convert_vegetation(field_id, d)).transpose()
    }

    async fn fetch_soil_sensors(&self, field_id: &str) -> Result<Vec<SoilSensorReading>> {
        let query = [
            ("field_id", field_id.to_string()),
            ("sensor_type", "soil_moisture".to_string()),
        ];
        let envelope: Option<Envelope<Vec<SensorReadingDto>>> =
            self.get_json(&["sensors", "readings"], &query).await?;

        Ok(envelope
            .map(|e| e.into_inner().into_iter().map(convert_sensor).collect())
            .unwrap_or_default())
    }

    async fn fetch_weather(&self, field_id: &str) -> Result<Option<WeatherConditions>> {
        let query = [("field_id", field_id.to_string())];
        let dto: Option<WeatherDto> = self.get_json(&["weather", "current"], &query).await?;

        dto.map(convert_weather).transpose()
    }

    async fn fetch_tasks(&self, field_id: &str) -> Result<Option<TaskSnapshot>> {
        let query = [("field_id", field_id.to_string())];
        let envelope: Option<Envelope<Vec<TaskDto>>> = self.get_json(&["tasks"], &query).await?;

        Ok(envelope.map(|e| convert_tasks(e.into_inner())))
    }

    async fn fetch_astronomical(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Option<AstronomicalSnapshot>> {
        let dto: Option<AstronomicalDto> = match date {
            Some(d) => {
                let query = [("date", d.to_string())];
                self.get_json(&["astronomical"], &query).await?
            }
            None => self.get_json(&["astronomical", "today"], &[]).await?,
        };

        Ok(dto.map(convert_astronomical))
    }

    async fn test_connection(&self) -> Result<bool> {
        let url = self.build_url(&["health"], &[])?;

        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| FieldScoreError::DataSourceUnavailable(format!("Farm API: {}", e)))?;

        Ok(response.status().is_success())
    }
}

fn convert_vegetation(field_id: &str, dto: VegetationDto) -> Result<VegetationReading> {
    let mean_index = dto.mean_index.ok_or_else(|| {
        FieldScoreError::InvalidData(format!("vegetation reading for {} has no index", field_id))
    })?;

    if !mean_index.is_finite() || !(-1.0..=1.0).contains(&mean_index) {
        return Err(FieldScoreError::InvalidData(format!(
            "vegetation index {} for {} is outside -1..1",
            mean_index, field_id
        )));
    }

    let health_status = dto.health_status.as_deref().and_then(|s| {
        let status = HealthStatus::from_str(s);
        if status.is_none() {
            tracing::debug!(field = field_id, status = s, "Ignoring unknown health status");
        }
        status
    });

    Ok(VegetationReading {
        field_id: dto.field_id.unwrap_or_else(|| field_id.to_string()),
        captured_at: dto.captured_at,
        mean_index,
        health_status,
        trend_hint: dto.trend.as_deref().and_then(Trend::from_str),
    })
}

fn convert_sensor(dto: SensorReadingDto) -> SoilSensorReading {
    SoilSensorReading {
        sensor_id: dto.sensor_id.into_string(),
        moisture_percent: dto.value,
        recorded_at: dto.recorded_at,
    }
}

fn convert_weather(dto: WeatherDto) -> Result<WeatherConditions> {
    if !dto.temperature.is_finite() || !(0.0..=100.0).contains(&dto.humidity) {
        return Err(FieldScoreError::InvalidData(format!(
            "weather reading out of range: {}°C, {}%",
            dto.temperature, dto.humidity
        )));
    }

    Ok(WeatherConditions {
        temperature_c: dto.temperature,
        humidity_percent: dto.humidity,
        source: WeatherSource::FarmApi,
        observed_at: dto.observed_at,
    })
}

fn convert_tasks(dtos: Vec<TaskDto>) -> TaskSnapshot {
    let tasks = dtos
        .into_iter()
        .filter_map(|dto| {
            let id = dto.id.into_string();
            match TaskStatus::from_str(&dto.status) {
                Some(status) => Some(FieldTask {
                    id,
                    title: dto.title,
                    status,
                    due_date: dto.due_date,
                }),
                None => {
                    tracing::warn!(
                        task = %id,
                        status = %dto.status,
                        "Skipping task with unknown status"
                    );
                    None
                }
            }
        })
        .collect();

    TaskSnapshot::new(tasks)
}

fn convert_astronomical(dto: AstronomicalDto) -> AstronomicalSnapshot {
    let (moon_phase, moon_phase_favorable) = dto
        .moon_phase
        .map(|m| (m.name, m.favorable))
        .unwrap_or((None, None));

    let (lunar_mansion, lunar_mansion_score) = dto
        .lunar_mansion
        .map(|m| (m.name, m.score))
        .unwrap_or((None, None));

    let top_recommendation = dto.top_recommendation.map(|advice| match advice {
        AdviceDto::Localized { en, th } => {
            let th = th.unwrap_or_else(|| en.clone());
            LocalizedText::new(en, th)
        }
        AdviceDto::Plain(text) => LocalizedText::new(text.clone(), text),
    });

    AstronomicalSnapshot {
        date: dto.date,
        overall_farming_score: dto.overall_farming_score,
        moon_phase,
        moon_phase_favorable,
        lunar_mansion,
        lunar_mansion_score,
        top_recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> FarmApiConfig {
        FarmApiConfig {
            url: "http://farm.local/api/".to_string(),
            token: "test_token".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn urls_join_base_and_segments() {
        let client = FarmApiClient::new(sample_config()).unwrap();
        let url = client
            .build_url(&["tasks"], &[("field_id", "plot-3".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://farm.local/api/tasks?field_id=plot-3");
    }

    #[test]
    fn field_ids_stay_in_one_segment() {
        let client = FarmApiClient::new(sample_config()).unwrap();

        let url = client
            .build_url(&["fields", "plot#7", "vegetation", "latest"], &[])
            .unwrap();
        assert_eq!(url.path(), "/api/fields/plot%237/vegetation/latest");
        assert!(url.fragment().is_none());

        let url = client
            .build_url(&["fields", "plot?x=1", "vegetation"], &[])
            .unwrap();
        assert_eq!(url.path(), "/api/fields/plot%3Fx=1/vegetation");
        assert!(url.query().is_none());

        let url = client.build_url(&["fields", "a/b", "vegetation"], &[]).unwrap();
        assert_eq!(url.path_segments().map(|s| s.count()), Some(4));
    }

    #[test]
    fn query_values_are_encoded() {
        let client = FarmApiClient::new(sample_config()).unwrap();
        let url = client
            .build_url(&["weather", "current"], &[("field_id", "north 40&x".to_string())])
            .unwrap();
        assert_eq!(url.query(), Some("field_id=north+40%26x"));
    }

    #[test]
    fn vegetation_payload() {
        let dto: VegetationDto = serde_json::from_str(
            r#"{"mean_ndvi": 0.64, "health_status": "good", "trend": "improving",
                "captured_at": "2026-05-01T03:00:00Z"}"#,
        )
        .unwrap();
        let reading = convert_vegetation("plot-3", dto).unwrap();
        assert_eq!(reading.field_id, "plot-3");
        assert_eq!(reading.mean_index, 0.64);
        assert_eq!(reading.health_status, Some(HealthStatus::Good));
        assert_eq!(reading.trend_hint, Some(Trend::Improving));
        assert!(reading.captured_at.is_some());
    }

    #[test]
    fn vegetation_out_of_range_is_malformed() {
        let dto: VegetationDto = serde_json::from_str(r#"{"ndvi": 3.2}"#).unwrap();
        assert!(matches!(
            convert_vegetation("plot-3", dto),
            Err(FieldScoreError::InvalidData(_))
        ));

        let dto: VegetationDto = serde_json::from_str(r#"{"health_status": "good"}"#).unwrap();
        assert!(convert_vegetation("plot-3", dto).is_err());
    }

    #[test]
    fn unknown_health_status_falls_back_to_index() {
        let dto: VegetationDto =
            serde_json::from_str(r#"{"mean_index": 0.2, "health_status": "splendid"}"#).unwrap();
        let reading = convert_vegetation("p", dto).unwrap();
        assert!(reading.health_status.is_none());
    }

    #[test]
    fn sensor_envelopes() {
        let wrapped: Envelope<Vec<SensorReadingDto>> = serde_json::from_str(
            r#"{"data": [{"sensor_id": 7, "value": 41.5}, {"id": "s-2", "moisture": 38.5}]}"#,
        )
        .unwrap();
        let readings: Vec<SoilSensorReading> =
            wrapped.into_inner().into_iter().map(convert_sensor).collect();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].sensor_id, "7");
        assert_eq!(readings[1].moisture_percent, 38.5);

        let bare: Envelope<Vec<SensorReadingDto>> =
            serde_json::from_str(r#"[{"sensor_id": "a", "value": 20}]"#).unwrap();
        assert_eq!(bare.into_inner().len(), 1);
    }

    #[test]
    fn weather_payload_validation() {
        let dto: WeatherDto =
            serde_json::from_str(r#"{"temperature": 31.0, "humidity": 62}"#).unwrap();
        let weather = convert_weather(dto).unwrap();
        assert_eq!(weather.temperature_c, 31.0);
        assert_eq!(weather.source, WeatherSource::FarmApi);

        let dto: WeatherDto = serde_json::from_str(r#"{"temp": 31.0, "humidity": 140}"#).unwrap();
        assert!(convert_weather(dto).is_err());
    }

    #[test]
    fn tasks_with_unknown_status_are_skipped() {
        let dtos: Vec<TaskDto> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "Spray", "status": "open", "due_date": "2026-04-01T00:00:00Z"},
                {"id": "2", "title": "Harvest", "status": "completed"},
                {"id": 3, "title": "Mystery", "status": "archived"}
            ]"#,
        )
        .unwrap();
        let snapshot = convert_tasks(dtos);
        assert_eq!(snapshot.total(), 2);
        assert_eq!(snapshot.tasks[0].id, "1");
        assert!(snapshot.tasks[0].due_date.is_some());
        assert_eq!(snapshot.tasks[1].status, TaskStatus::Completed);
    }

    #[test]
    fn astronomical_payload() {
        let dto: AstronomicalDto = serde_json::from_str(
            r#"{
                "date": "2026-05-10",
                "moon_phase": {"name": "Waxing Crescent", "favorable_for_farming": true},
                "lunar_mansion": {"name": "Rohini", "farming_score": 8},
                "top_recommendation": {"en": "Plant leafy greens", "th": "ปลูกผักใบ"}
            }"#,
        )
        .unwrap();
        let snapshot = convert_astronomical(dto);
        assert_eq!(snapshot.date, NaiveDate::from_ymd_opt(2026, 5, 10));
        assert!(snapshot.overall_farming_score.is_none());
        assert_eq!(snapshot.moon_phase_favorable, Some(true));
        assert_eq!(snapshot.lunar_mansion_score, Some(8.0));
        assert_eq!(
            snapshot.top_recommendation.map(|r| r.th),
            Some("ปลูกผักใบ".to_string())
        );
    }

    #[test]
    fn astronomical_plain_advice() {
        let dto: AstronomicalDto = serde_json::from_str(
            r#"{"farming_score": 74.5, "top_recommendation": "Good day to sow"}"#,
        )
        .unwrap();
        let snapshot = convert_astronomical(dto);
        assert_eq!(snapshot.overall_farming_score, Some(74.5));
        let advice = snapshot.top_recommendation.unwrap();
        assert_eq!(advice.en, "Good day to sow");
        assert_eq!(advice.th, "Good day to sow");
    }
}
