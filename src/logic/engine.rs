use super::alerts::generate_alerts;
use super::combiner::{classify_trend, overall_score};
use super::context::ScoringContext;
use super::rules::RulesEngine;
use super::subscores::{astral_score, attention_score, health_score, hydration_score};
use super::thresholds::ScoringThresholds;
use crate::models::{FieldHealthScore, FieldSnapshots, SubScores};
use chrono::{DateTime, Utc};

/// Turns a set of snapshots into a `FieldHealthScore`.
///
/// Holds no per-field state; one engine can score any number of fields,
/// from any number of tasks, concurrently.
pub struct FieldScoreEngine {
    thresholds: ScoringThresholds,
    rules: RulesEngine,
}

impl FieldScoreEngine {
    pub fn new(thresholds: ScoringThresholds) -> Self {
        Self {
            thresholds,
            rules: RulesEngine::new(),
        }
    }

    pub fn thresholds(&self) -> &ScoringThresholds {
        &self.thresholds
    }

    pub fn rules(&self) -> &RulesEngine {
        &self.rules
    }

    pub fn sub_scores(&self, snapshots: &FieldSnapshots, now: DateTime<Utc>) -> SubScores {
        let t = &self.thresholds;
        SubScores {
            health: health_score(snapshots.vegetation.as_ref(), t),
            hydration: hydration_score(snapshots.environment.as_ref(), t),
            attention: attention_score(snapshots.tasks.as_ref(), now, t),
            astral: astral_score(snapshots.astronomical.as_ref()),
        }
    }

    /// Deterministic for a given `(field_id, snapshots, now)`
    pub fn compute(
        &self,
        field_id: &str,
        snapshots: &FieldSnapshots,
        now: DateTime<Utc>,
    ) -> FieldHealthScore {
        let scores = self.sub_scores(snapshots, now);
        let overall = overall_score(&scores);
        let trend = classify_trend(snapshots.vegetation.as_ref(), scores.health, &self.thresholds);

        let ctx = ScoringContext {
            field_id,
            snapshots,
            scores,
            thresholds: &self.thresholds,
            now,
        };

        let alerts = generate_alerts(&ctx);
        let recommendations = self.rules.evaluate(&ctx);

        tracing::debug!(
            field = field_id,
            overall,
            health = scores.health,
            hydration = scores.hydration,
            attention = scores.attention,
            astral = scores.astral,
            alerts = alerts.len(),
            recommendations = recommendations.len(),
            "Computed field health score"
        );

        FieldHealthScore {
            field_id: field_id.to_string(),
            overall,
            sub_scores: scores,
            trend,
            alerts,
            recommendations,
            computed_at: now,
            sources: snapshots.status(),
        }
    }
}

impl Default for FieldScoreEngine {
    fn default() -> Self {
        Self::new(ScoringThresholds::default())
    }
}
