use super::Rule;
use crate::logic::context::ScoringContext;
use crate::models::{LocalizedText, Priority, Recommendation, RecommendationType};

/// Clear the task backlog when it is pulling the attention score down
///
/// Conditions:
/// - Attention sub-score below 60
pub struct TaskBacklogRule;

impl Rule for TaskBacklogRule {
    fn id(&self) -> &'static str {
        "complete_pending_tasks"
    }

    fn name(&self) -> &'static str {
        "Complete Pending Tasks"
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>) -> Option<Recommendation> {
        let attention = ctx.scores.attention;
        if attention >= ctx.thresholds.attention_low {
            return None;
        }

        let overdue = ctx.overdue_count();
        let pending = ctx.pending_count();

        let rec = Recommendation::new(
            ctx.field_id,
            self.id(),
            RecommendationType::General,
            Priority::High,
            LocalizedText::new("Complete Pending Tasks", "เร่งทำงานที่ค้างอยู่"),
            LocalizedText::new(
                format!(
                    "{} tasks are pending and {} are overdue (attention score {}).",
                    pending, overdue, attention
                ),
                format!(
                    "มีงานค้าง {} งาน เลยกำหนด {} งาน (คะแนนการดูแล {})",
                    pending, overdue, attention
                ),
            ),
        )
        .with_action(
            "Finish overdue tasks first, oldest due date first",
            "ทำงานที่เลยกำหนดก่อน โดยเริ่มจากงานที่ค้างนานที่สุด",
        )
        .with_action(
            "Reassign or cancel tasks that are no longer relevant",
            "มอบหมายใหม่หรือยกเลิกงานที่ไม่จำเป็นแล้ว",
        )
        .with_benefit(
            "Keeps field operations on schedule",
            "ช่วยให้งานในแปลงเป็นไปตามแผน",
        );

        Some(rec)
    }
}
