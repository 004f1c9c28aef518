use super::FieldScoreEngine;
use crate::config::Config;
use crate::datasources::{
    DemoDataSource, FarmApiClient, FieldDataSource, OpenWeatherMapClient, WeatherProvider,
};
use crate::error::{FieldScoreError, Result};
use crate::models::{EnvironmentReading, FieldHealthScore, FieldSnapshots};
use chrono::{DateTime, NaiveDate, Utc};
use std::future::Future;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches every snapshot for a field concurrently and hands them to the
/// scoring engine.
///
/// A source that errors, returns nothing, or exceeds the timeout is simply
/// absent from the result. The remaining sources are still scored.
pub struct FieldSnapshotAggregator {
    source: Box<dyn FieldDataSource>,
    weather: Option<Box<dyn WeatherProvider>>,
    engine: FieldScoreEngine,
    timeout: Duration,
    date: Option<NaiveDate>,
}

impl FieldSnapshotAggregator {
    pub fn new(source: Box<dyn FieldDataSource>, engine: FieldScoreEngine) -> Self {
        Self {
            source,
            weather: None,
            engine,
            timeout: DEFAULT_TIMEOUT,
            date: None,
        }
    }

    /// Build from configuration. Demo data is used when `demo` is set or
    /// no farm API URL is configured.
    pub fn from_config(config: &Config, demo: bool) -> Result<Self> {
        let engine = FieldScoreEngine::new(config.scoring.clone());

        let source: Box<dyn FieldDataSource> = if demo || !config.farm_api.is_configured() {
            if !demo {
                tracing::warn!("Farm API URL not configured - using demo data");
            }
            Box::new(DemoDataSource::new())
        } else {
            Box::new(FarmApiClient::new(config.farm_api.clone())?)
        };

        let timeout = Duration::from_secs(config.farm_api.timeout_secs.max(1));
        let mut aggregator = Self::new(source, engine).with_timeout(timeout);

        // OpenWeatherMap only replaces live data; demo weather stays canned
        let owm = config
            .openweathermap
            .as_ref()
            .filter(|c| !demo && c.enabled && !c.api_key.is_empty());
        if let Some(owm) = owm {
            tracing::info!("OpenWeatherMap client configured for current conditions");
            let client = OpenWeatherMapClient::new(owm.clone(), timeout)?;
            aggregator = aggregator.with_weather_provider(Box::new(client));
        }

        Ok(aggregator)
    }

    pub fn with_weather_provider(mut self, provider: Box<dyn WeatherProvider>) -> Self {
        self.weather = Some(provider);
        self
    }

    /// Upper bound for each individual fetch
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Score against a past vegetation capture and calendar day
    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    pub fn engine(&self) -> &FieldScoreEngine {
        &self.engine
    }

    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    /// Name of the separate weather provider, if one is configured
    pub fn weather_provider_name(&self) -> Option<&str> {
        self.weather.as_ref().map(|w| w.provider_name())
    }

    /// Clock that overdue tasks are judged against.
    ///
    /// With a date set this is the end of that day, capped at the present so
    /// a future date never counts tasks as overdue early.
    fn scoring_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.date
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .map(|end_of_day| end_of_day.and_utc().min(now))
            .unwrap_or(now)
    }

    /// Fetch all snapshots for one field. Never fails.
    pub async fn fetch(&self, field_id: &str) -> FieldSnapshots {
        let limit = self.timeout;

        let vegetation = guarded(
            "vegetation",
            field_id,
            limit,
            self.source.fetch_vegetation(field_id, self.date),
        );

        let sensors = guarded("soil", field_id, limit, async {
            self.source
                .fetch_soil_sensors(field_id)
                .await
                .map(|readings| (!readings.is_empty()).then_some(readings))
        });

        let weather = guarded("weather", field_id, limit, async {
            match &self.weather {
                Some(provider) => provider.current_weather(field_id).await,
                None => self.source.fetch_weather(field_id).await,
            }
        });

        let tasks = guarded("tasks", field_id, limit, self.source.fetch_tasks(field_id));

        let astronomical = guarded(
            "astronomical",
            field_id,
            limit,
            self.source.fetch_astronomical(self.date),
        );

        let (vegetation, sensors, weather, tasks, astronomical) =
            tokio::join!(vegetation, sensors, weather, tasks, astronomical);

        let environment =
            EnvironmentReading::from_parts(sensors.as_deref().unwrap_or_default(), weather);

        let snapshots = FieldSnapshots {
            vegetation,
            environment: (!environment.is_empty()).then_some(environment),
            tasks,
            astronomical,
        };

        let missing = snapshots.status().missing();
        if !missing.is_empty() {
            tracing::info!(field = field_id, missing = ?missing, "Scoring with partial data");
        }

        snapshots
    }

    pub async fn compute_field_health_score(&self, field_id: &str) -> FieldHealthScore {
        self.compute_at(field_id, self.scoring_time(Utc::now())).await
    }

    pub async fn compute_at(&self, field_id: &str, now: DateTime<Utc>) -> FieldHealthScore {
        let snapshots = self.fetch(field_id).await;
        self.engine.compute(field_id, &snapshots, now)
    }

    /// Score several fields concurrently, preserving input order
    pub async fn score_fields(&self, field_ids: &[String]) -> Vec<FieldHealthScore> {
        futures::future::join_all(
            field_ids
                .iter()
                .map(|id| self.compute_field_health_score(id)),
        )
        .await
    }

    /// Test every configured source. Each check is bounded by the timeout.
    pub async fn check_connections(&self) -> ConnectionStatus {
        let source = reachable(
            self.source.source_name(),
            self.timeout,
            self.source.test_connection(),
        );
        let weather = async {
            match &self.weather {
                Some(provider) => Some(
                    reachable(provider.provider_name(), self.timeout, provider.test_connection())
                        .await,
                ),
                None => None,
            }
        };

        let (source, weather) = tokio::join!(source, weather);
        ConnectionStatus { source, weather }
    }
}

async fn reachable<F>(name: &str, limit: Duration, fut: F) -> bool
where
    F: Future<Output = Result<bool>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(ok)) => ok,
        Ok(Err(e)) => {
            tracing::warn!(source = name, "Connection test failed: {}", e);
            false
        }
        Err(_) => {
            tracing::warn!(source = name, "Connection test timed out after {:?}", limit);
            false
        }
    }
}

/// Run one fetch under the timeout, folding every failure into `None`
async fn guarded<T, F>(source: &'static str, field_id: &str, limit: Duration, fut: F) -> Option<T>
where
    F: Future<Output = Result<Option<T>>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(Some(value))) => Some(value),
        Ok(Ok(None)) => {
            tracing::debug!(field = field_id, source, "Source has no data");
            None
        }
        Ok(Err(e)) => {
            tracing::warn!(field = field_id, source, "Failed to fetch snapshot: {}", e);
            None
        }
        Err(_) => {
            let e = FieldScoreError::Timeout(format!("{} after {:?}", source, limit));
            tracing::warn!(field = field_id, source, "{}", e);
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub source: bool,
    /// `None` when no separate weather provider is configured
    pub weather: Option<bool>,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.source && self.weather.unwrap_or(true)
    }
}
