use super::Rule;
use crate::logic::context::ScoringContext;
use crate::models::{LocalizedText, Priority, Recommendation, RecommendationType};

/// Crop health recovery rule
///
/// Conditions:
/// - Health sub-score below the warning threshold (50)
///
/// Priority:
/// - Urgent: health below the critical threshold (30)
/// - High: otherwise
pub struct CropHealthRule;

impl Rule for CropHealthRule {
    fn id(&self) -> &'static str {
        "improve_crop_health"
    }

    fn name(&self) -> &'static str {
        "Improve Crop Health"
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>) -> Option<Recommendation> {
        let health = ctx.scores.health;
        if health >= ctx.thresholds.health_warning {
            return None;
        }

        let priority = if health < ctx.thresholds.health_critical {
            Priority::Urgent
        } else {
            Priority::High
        };

        let index_note = ctx
            .snapshots
            .vegetation
            .as_ref()
            .map(|v| format!(" (vegetation index {:.2})", v.mean_index))
            .unwrap_or_default();

        let rec = Recommendation::new(
            ctx.field_id,
            self.id(),
            RecommendationType::CropCare,
            priority,
            LocalizedText::new("Improve Crop Health", "ฟื้นฟูสุขภาพพืช"),
            LocalizedText::new(
                format!(
                    "Crop health score is {}{}. Vegetation vigour is below normal.",
                    health, index_note
                ),
                format!(
                    "คะแนนสุขภาพพืชอยู่ที่ {}{} ความสมบูรณ์ของพืชต่ำกว่าปกติ",
                    health, index_note
                ),
            ),
        )
        .with_action(
            "Walk the low-index zones and check for pests or disease",
            "สำรวจพื้นที่ที่ค่าดัชนีต่ำเพื่อหาศัตรูพืชหรือโรค",
        )
        .with_action(
            "Take a soil sample and review nutrient levels",
            "เก็บตัวอย่างดินและตรวจระดับธาตุอาหาร",
        )
        .with_action(
            "Apply foliar fertiliser where deficiency is confirmed",
            "ฉีดพ่นปุ๋ยทางใบในจุดที่พบการขาดธาตุอาหาร",
        )
        .with_benefit(
            "Recovers canopy vigour before yield is affected",
            "ฟื้นฟูความสมบูรณ์ของทรงพุ่มก่อนกระทบผลผลิต",
        );

        Some(rec)
    }
}
