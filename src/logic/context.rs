use super::thresholds::ScoringThresholds;
use crate::models::{FieldSnapshots, SubScores, WeatherConditions};
use chrono::{DateTime, Utc};

/// Everything the alert and recommendation rules look at for one field
pub struct ScoringContext<'a> {
    pub field_id: &'a str,
    pub snapshots: &'a FieldSnapshots,
    pub scores: SubScores,
    pub thresholds: &'a ScoringThresholds,
    pub now: DateTime<Utc>,
}

impl ScoringContext<'_> {
    pub fn soil_moisture(&self) -> Option<f64> {
        self.snapshots.soil_moisture().filter(|m| m.is_finite())
    }

    pub fn weather(&self) -> Option<&WeatherConditions> {
        self.snapshots
            .environment
            .as_ref()
            .and_then(|e| e.weather.as_ref())
    }

    pub fn overdue_count(&self) -> usize {
        self.snapshots
            .tasks
            .as_ref()
            .map(|t| t.overdue_count(self.now))
            .unwrap_or(0)
    }

    pub fn pending_count(&self) -> usize {
        self.snapshots
            .tasks
            .as_ref()
            .map(|t| t.pending_count())
            .unwrap_or(0)
    }

    pub fn heat_stress(&self) -> bool {
        self.snapshots.environment.as_ref().is_some_and(|e| {
            e.heat_stress(
                self.thresholds.heat_stress_temp_c,
                self.thresholds.heat_stress_humidity,
            )
        })
    }
}
