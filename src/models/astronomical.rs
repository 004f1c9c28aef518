use super::text::LocalizedText;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lunar farming-calendar entry for one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AstronomicalSnapshot {
    pub date: Option<NaiveDate>,
    /// Pre-computed 0-100 suitability from the calendar service
    pub overall_farming_score: Option<f64>,
    pub moon_phase: Option<String>,
    pub moon_phase_favorable: Option<bool>,
    pub lunar_mansion: Option<String>,
    /// 0-10 farming score of the current lunar mansion
    pub lunar_mansion_score: Option<f64>,
    pub top_recommendation: Option<LocalizedText>,
}

impl AstronomicalSnapshot {
    pub fn with_score(mut self, score: f64) -> Self {
        self.overall_farming_score = Some(score);
        self
    }

    pub fn with_moon_phase(mut self, name: &str, favorable: bool) -> Self {
        self.moon_phase = Some(name.to_string());
        self.moon_phase_favorable = Some(favorable);
        self
    }

    pub fn with_mansion(mut self, name: &str, score: f64) -> Self {
        self.lunar_mansion = Some(name.to_string());
        self.lunar_mansion_score = Some(score);
        self
    }

    pub fn with_recommendation(mut self, text: LocalizedText) -> Self {
        self.top_recommendation = Some(text);
        self
    }
}
