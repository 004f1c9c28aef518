pub mod astral_timing;
pub mod crop_health;
pub mod engine;
pub mod heat_stress;
pub mod irrigation;
pub mod task_backlog;

pub use engine::RulesEngine;

use super::context::ScoringContext;
use crate::models::Recommendation;

/// Trait for recommendation rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule, also the suffix of the recommendation id
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a recommendation if conditions are met
    fn evaluate(&self, ctx: &ScoringContext<'_>) -> Option<Recommendation>;
}
