use super::score::Trend;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categorical crop condition reported by the vegetation-index service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Excellent,
    Good,
    Moderate,
    Poor,
    Critical,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Moderate => "Moderate",
            HealthStatus::Poor => "Poor",
            HealthStatus::Critical => "Critical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "excellent" => Some(HealthStatus::Excellent),
            "good" => Some(HealthStatus::Good),
            "moderate" | "fair" => Some(HealthStatus::Moderate),
            "poor" => Some(HealthStatus::Poor),
            "critical" => Some(HealthStatus::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Latest satellite vegetation-index sample for a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VegetationReading {
    pub field_id: String,
    pub captured_at: Option<DateTime<Utc>>,
    /// NDVI-like greenness in -1.0..=1.0
    pub mean_index: f64,
    pub health_status: Option<HealthStatus>,
    pub trend_hint: Option<Trend>,
}

impl VegetationReading {
    pub fn new(field_id: impl Into<String>, mean_index: f64) -> Self {
        Self {
            field_id: field_id.into(),
            captured_at: None,
            mean_index,
            health_status: None,
            trend_hint: None,
        }
    }

    pub fn with_status(mut self, status: HealthStatus) -> Self {
        self.health_status = Some(status);
        self
    }

    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend_hint = Some(trend);
        self
    }

    pub fn captured(mut self, at: DateTime<Utc>) -> Self {
        self.captured_at = Some(at);
        self
    }
}
