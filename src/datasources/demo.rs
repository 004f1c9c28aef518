use super::FieldDataSource;
use crate::error::Result;
use crate::models::{
    AstronomicalSnapshot, FieldTask, HealthStatus, LocalizedText, SoilSensorReading, TaskSnapshot,
    TaskStatus, Trend, VegetationReading, WeatherConditions, WeatherSource,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Field ids the demo source has canned data for
pub const DEMO_FIELDS: [&str; 4] = ["north-40", "east-paddy", "river-flat", "south-orchard"];

/// Canned snapshots for trying the tool without a farm backend.
///
/// Unknown field ids have no vegetation, sensor, weather or task data.
pub struct DemoDataSource {
    reference: DateTime<Utc>,
}

enum Scenario {
    Thriving,
    DryHeat,
    Waterlogged,
    Backlog,
}

impl DemoDataSource {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Anchor task due dates to `reference` instead of the wall clock
    pub fn at(reference: DateTime<Utc>) -> Self {
        Self { reference }
    }

    fn scenario(field_id: &str) -> Option<Scenario> {
        match field_id {
            "north-40" => Some(Scenario::Thriving),
            "east-paddy" => Some(Scenario::DryHeat),
            "river-flat" => Some(Scenario::Waterlogged),
            "south-orchard" => Some(Scenario::Backlog),
            _ => None,
        }
    }

    fn sensor(id: &str, moisture: f64) -> SoilSensorReading {
        SoilSensorReading {
            sensor_id: id.to_string(),
            moisture_percent: moisture,
            recorded_at: None,
        }
    }

    fn task(&self, id: &str, title: &str, status: TaskStatus, due_in_days: i64) -> FieldTask {
        FieldTask::new(id, title, status).due(self.reference + Duration::days(due_in_days))
    }
}

impl Default for DemoDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FieldDataSource for DemoDataSource {
    fn source_name(&self) -> &str {
        "Demo data"
    }

    async fn fetch_vegetation(
        &self,
        field_id: &str,
        _date: Option<NaiveDate>,
    ) -> Result<Option<VegetationReading>> {
        let reading = match Self::scenario(field_id) {
            Some(Scenario::Thriving) => VegetationReading::new(field_id, 0.78)
                .with_status(HealthStatus::Excellent)
                .with_trend(Trend::Improving),
            Some(Scenario::DryHeat) => VegetationReading::new(field_id, 0.28)
                .with_status(HealthStatus::Poor)
                .with_trend(Trend::Declining),
            Some(Scenario::Waterlogged) => {
                VegetationReading::new(field_id, 0.42).with_status(HealthStatus::Moderate)
            }
            Some(Scenario::Backlog) => VegetationReading::new(field_id, 0.55),
            None => return Ok(None),
        };

        // Satellite passes land every few days
        Ok(Some(reading.captured(self.reference - Duration::days(2))))
    }

    async fn fetch_soil_sensors(&self, field_id: &str) -> Result<Vec<SoilSensorReading>> {
        let sensors = match Self::scenario(field_id) {
            Some(Scenario::Thriving) => {
                vec![Self::sensor("n40-a", 44.0), Self::sensor("n40-b", 47.0)]
            }
            Some(Scenario::DryHeat) => {
                vec![Self::sensor("ep-1", 14.0), Self::sensor("ep-2", 17.0)]
            }
            Some(Scenario::Waterlogged) => vec![Self::sensor("rf-1", 88.0)],
            Some(Scenario::Backlog) => vec![Self::sensor("so-1", 36.0)],
            None => Vec::new(),
        };

        Ok(sensors)
    }

    async fn fetch_weather(&self, field_id: &str) -> Result<Option<WeatherConditions>> {
        let (temperature, humidity) = match Self::scenario(field_id) {
            Some(Scenario::Thriving) => (29.0, 62.0),
            Some(Scenario::DryHeat) => (38.5, 22.0),
            Some(Scenario::Waterlogged) => (26.0, 91.0),
            Some(Scenario::Backlog) => (31.0, 55.0),
            None => return Ok(None),
        };

        Ok(Some(WeatherConditions::new(
            temperature,
            humidity,
            WeatherSource::Demo,
        )))
    }

    async fn fetch_tasks(&self, field_id: &str) -> Result<Option<TaskSnapshot>> {
        let tasks = match Self::scenario(field_id) {
            Some(Scenario::Thriving) => vec![
                self.task("n40-1", "Scout for leaf folder", TaskStatus::Completed, -2),
                self.task("n40-2", "Top-dress nitrogen", TaskStatus::Open, 3),
            ],
            Some(Scenario::DryHeat) => vec![
                self.task("ep-1", "Repair drip line", TaskStatus::InProgress, -1),
                self.task("ep-2", "Mulch seedbeds", TaskStatus::Open, 2),
            ],
            Some(Scenario::Waterlogged) => vec![
                self.task("rf-1", "Clear drainage ditch", TaskStatus::Open, 1),
            ],
            Some(Scenario::Backlog) => {
                let titles = [
                    "Prune dead wood",
                    "Check fruit fly traps",
                    "Replace tree ties",
                    "Spread compost",
                    "Inspect canker",
                    "Tighten trellis wire",
                ];
                titles
                    .iter()
                    .enumerate()
                    .map(|(i, title)| {
                        let overdue_by = i as i64 + 1;
                        self.task(&format!("so-{}", i + 1), title, TaskStatus::Open, -overdue_by)
                    })
                    .chain(std::iter::once(self.task(
                        "so-7",
                        "Order netting",
                        TaskStatus::Open,
                        5,
                    )))
                    .collect()
            }
            None => return Ok(None),
        };

        Ok(Some(TaskSnapshot::new(tasks)))
    }

    async fn fetch_astronomical(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Option<AstronomicalSnapshot>> {
        let snapshot = AstronomicalSnapshot {
            date: Some(date.unwrap_or_else(|| self.reference.date_naive())),
            ..Default::default()
        }
        .with_score(76.0)
        .with_moon_phase("Waxing Gibbous", true)
        .with_mansion("Rohini", 8.0)
        .with_recommendation(LocalizedText::new(
            "Favourable day for transplanting seedlings",
            "วันดีสำหรับย้ายกล้า",
        ));

        Ok(Some(snapshot))
    }

    async fn test_connection(&self) -> Result<bool> {
        Ok(true)
    }
}
