use super::text::LocalizedText;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "Info",
            AlertSeverity::Warning => "Warning",
            AlertSeverity::Critical => "Critical",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "ℹ",
            AlertSeverity::Warning => "⚠",
            AlertSeverity::Critical => "!",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    CropHealth,
    Irrigation,
    System,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::CropHealth => "Crop Health",
            AlertCategory::Irrigation => "Irrigation",
            AlertCategory::System => "System",
        }
    }
}

impl std::fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAlert {
    pub id: String,
    pub severity: AlertSeverity,
    pub category: AlertCategory,
    pub title: LocalizedText,
    pub message: LocalizedText,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl FieldAlert {
    pub fn new(
        field_id: &str,
        kind: &str,
        severity: AlertSeverity,
        category: AlertCategory,
        title: LocalizedText,
        message: LocalizedText,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: alert_id(field_id, kind),
            severity,
            category,
            title,
            message,
            timestamp,
            current_value: None,
            threshold: None,
        }
    }

    pub fn with_measurement(mut self, current_value: f64, threshold: f64) -> Self {
        self.current_value = Some(current_value);
        self.threshold = Some(threshold);
        self
    }
}

/// Stable across recomputation: depends only on field and alert kind
pub fn alert_id(field_id: &str, kind: &str) -> String {
    format!("{}:alert:{}", field_id, kind)
}
