use super::alert::FieldAlert;
use super::recommendation::Recommendation;
use super::snapshot::SourceStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "↑ Improving",
            Trend::Stable => "→ Stable",
            Trend::Declining => "↓ Declining",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "improving" | "up" | "rising" => Some(Trend::Improving),
            "stable" | "flat" => Some(Trend::Stable),
            "declining" | "down" | "falling" => Some(Trend::Declining),
            _ => None,
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four 0-100 components of the field score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub health: u8,
    pub hydration: u8,
    pub attention: u8,
    pub astral: u8,
}

/// Composite "living field" score. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldHealthScore {
    pub field_id: String,
    pub overall: u8,
    #[serde(flatten)]
    pub sub_scores: SubScores,
    pub trend: Trend,
    pub alerts: Vec<FieldAlert>,
    pub recommendations: Vec<Recommendation>,
    pub computed_at: DateTime<Utc>,
    pub sources: SourceStatus,
}

impl FieldHealthScore {
    pub fn health(&self) -> u8 {
        self.sub_scores.health
    }

    pub fn hydration(&self) -> u8 {
        self.sub_scores.hydration
    }

    pub fn attention(&self) -> u8 {
        self.sub_scores.attention
    }

    pub fn astral(&self) -> u8 {
        self.sub_scores.astral
    }

    pub fn grade(&self) -> &'static str {
        match self.overall {
            80..=100 => "Thriving",
            60..=79 => "Healthy",
            40..=59 => "Needs Attention",
            _ => "At Risk",
        }
    }
}
