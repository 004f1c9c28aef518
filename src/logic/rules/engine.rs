use super::{
    astral_timing::AstralTimingRule,
    crop_health::CropHealthRule,
    heat_stress::HeatStressRule,
    irrigation::{IncreaseIrrigationRule, ReduceIrrigationRule},
    task_backlog::TaskBacklogRule,
    Rule,
};
use crate::logic::context::ScoringContext;
use crate::models::Recommendation;

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    /// Rules are evaluated, and their output ordered, in declaration order
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(CropHealthRule),
            Box::new(IncreaseIrrigationRule),
            Box::new(ReduceIrrigationRule),
            Box::new(TaskBacklogRule),
            Box::new(AstralTimingRule),
            Box::new(HeatStressRule),
        ];

        Self { rules }
    }

    pub fn evaluate(&self, ctx: &ScoringContext<'_>) -> Vec<Recommendation> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let rec = rule.evaluate(ctx);
                if rec.is_some() {
                    tracing::trace!(field = ctx.field_id, rule = rule.id(), "Rule fired");
                }
                rec
            })
            .collect()
    }

    /// `(id, name)` for every rule, in evaluation order
    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}
