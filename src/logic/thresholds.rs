//! Scoring thresholds and sub-score weights

use crate::error::{FieldScoreError, Result};
use serde::{Deserialize, Serialize};

/// Sub-score weights for the overall score, in percent. Fixed; not configurable.
pub mod weights {
    pub const HEALTH: u32 = 35;
    pub const HYDRATION: u32 = 35;
    pub const ATTENTION: u32 = 20;
    pub const ASTRAL: u32 = 10;
}

/// Every threshold the calculators, alert rules and recommendation rules
/// compare against. Loaded once and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringThresholds {
    // === Vegetation index breakpoints ===
    pub ndvi_excellent: f64,
    pub ndvi_good: f64,
    pub ndvi_moderate: f64,
    pub ndvi_poor: f64,

    // === Soil moisture (%) ===
    pub moisture_critical_low: f64,
    pub moisture_optimal_min: f64,
    pub moisture_optimal_max: f64,
    pub moisture_critical_high: f64,

    // === Weather ===
    /// Heat stress when temperature exceeds this (°C) ...
    pub heat_stress_temp_c: f64,
    /// ... while humidity is below this (%)
    pub heat_stress_humidity: f64,
    pub comfortable_humidity_min: f64,
    pub comfortable_humidity_max: f64,

    // === Task backlog ===
    pub overdue_critical: usize,
    pub overdue_warning: usize,
    pub pending_high: usize,
    pub pending_elevated: usize,
    pub completion_bonus_rate: f64,

    // === Sub-score triggers for alerts and recommendations ===
    pub health_critical: u8,
    pub health_warning: u8,
    pub hydration_low: u8,
    pub attention_low: u8,
    pub astral_favorable: u8,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            ndvi_excellent: 0.7,
            ndvi_good: 0.5,
            ndvi_moderate: 0.3,
            ndvi_poor: 0.15,

            moisture_critical_low: 20.0,
            moisture_optimal_min: 30.0,
            moisture_optimal_max: 60.0,
            moisture_critical_high: 80.0,

            heat_stress_temp_c: 35.0,
            heat_stress_humidity: 30.0,
            comfortable_humidity_min: 50.0,
            comfortable_humidity_max: 70.0,

            overdue_critical: 5,
            overdue_warning: 2,
            pending_high: 10,
            pending_elevated: 5,
            completion_bonus_rate: 0.8,

            health_critical: 30,
            health_warning: 50,
            hydration_low: 40,
            attention_low: 60,
            astral_favorable: 70,
        }
    }
}

impl ScoringThresholds {
    /// Reject orderings that would make score bands overlap
    pub fn validate(&self) -> Result<()> {
        let ndvi = [
            self.ndvi_poor,
            self.ndvi_moderate,
            self.ndvi_good,
            self.ndvi_excellent,
        ];
        if ndvi.windows(2).any(|w| w[0] >= w[1]) || ndvi.iter().any(|v| !(-1.0..=1.0).contains(v))
        {
            return Err(FieldScoreError::Config(format!(
                "vegetation index breakpoints must be strictly increasing within -1..1, got {:?}",
                ndvi
            )));
        }

        let moisture = [
            self.moisture_critical_low,
            self.moisture_optimal_min,
            self.moisture_optimal_max,
            self.moisture_critical_high,
        ];
        if moisture.windows(2).any(|w| w[0] > w[1])
            || moisture.iter().any(|v| !(0.0..=100.0).contains(v))
        {
            return Err(FieldScoreError::Config(format!(
                "soil moisture thresholds must be ordered within 0..100, got {:?}",
                moisture
            )));
        }

        if self.comfortable_humidity_min > self.comfortable_humidity_max {
            return Err(FieldScoreError::Config(
                "comfortable_humidity_min exceeds comfortable_humidity_max".into(),
            ));
        }

        if self.overdue_warning > self.overdue_critical {
            return Err(FieldScoreError::Config(
                "overdue_warning exceeds overdue_critical".into(),
            ));
        }

        if self.pending_elevated > self.pending_high {
            return Err(FieldScoreError::Config(
                "pending_elevated exceeds pending_high".into(),
            ));
        }

        if self.health_critical > self.health_warning {
            return Err(FieldScoreError::Config(
                "health_critical exceeds health_warning".into(),
            ));
        }

        Ok(())
    }
}
