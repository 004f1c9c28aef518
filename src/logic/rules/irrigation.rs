use super::Rule;
use crate::logic::context::ScoringContext;
use crate::models::{LocalizedText, Priority, Recommendation, RecommendationType};

/// Increase irrigation when the field is short of water
///
/// Conditions:
/// - Hydration sub-score below 40
pub struct IncreaseIrrigationRule;

impl Rule for IncreaseIrrigationRule {
    fn id(&self) -> &'static str {
        "increase_irrigation"
    }

    fn name(&self) -> &'static str {
        "Increase Irrigation"
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>) -> Option<Recommendation> {
        let hydration = ctx.scores.hydration;
        if hydration >= ctx.thresholds.hydration_low {
            return None;
        }

        let description = match ctx.soil_moisture() {
            Some(m) => LocalizedText::new(
                format!(
                    "Hydration score is {} with soil moisture at {:.0}%. Crops are short of water.",
                    hydration, m
                ),
                format!(
                    "คะแนนการให้น้ำอยู่ที่ {} ความชื้นในดิน {:.0}% พืชขาดน้ำ",
                    hydration, m
                ),
            ),
            None => LocalizedText::new(
                format!("Hydration score is {}. Crops are short of water.", hydration),
                format!("คะแนนการให้น้ำอยู่ที่ {} พืชขาดน้ำ", hydration),
            ),
        };

        let rec = Recommendation::new(
            ctx.field_id,
            self.id(),
            RecommendationType::Irrigation,
            Priority::Urgent,
            LocalizedText::new("Increase Irrigation", "เพิ่มการให้น้ำ"),
            description,
        )
        .with_action(
            "Irrigate within the next 24 hours",
            "ให้น้ำภายใน 24 ชั่วโมง",
        )
        .with_action(
            "Water early morning or late evening to limit evaporation",
            "ให้น้ำช่วงเช้าตรู่หรือเย็นเพื่อลดการระเหย",
        )
        .with_action(
            "Check drip lines and sprinklers for blockages",
            "ตรวจสอบสายน้ำหยดและหัวสปริงเกอร์ว่าอุดตันหรือไม่",
        )
        .with_benefit(
            "Prevents wilting and yield loss from drought stress",
            "ป้องกันพืชเหี่ยวและผลผลิตลดลงจากภาวะขาดน้ำ",
        );

        Some(rec)
    }
}

/// Reduce irrigation when the soil is waterlogged
///
/// Conditions:
/// - Soil moisture above the critical-high threshold (80%)
pub struct ReduceIrrigationRule;

impl Rule for ReduceIrrigationRule {
    fn id(&self) -> &'static str {
        "reduce_irrigation"
    }

    fn name(&self) -> &'static str {
        "Reduce Irrigation"
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>) -> Option<Recommendation> {
        let moisture = ctx.soil_moisture()?;
        if moisture <= ctx.thresholds.moisture_critical_high {
            return None;
        }

        let rec = Recommendation::new(
            ctx.field_id,
            self.id(),
            RecommendationType::Irrigation,
            Priority::High,
            LocalizedText::new("Reduce Irrigation", "ลดการให้น้ำ"),
            LocalizedText::new(
                format!(
                    "Soil moisture is {:.0}%. The root zone is saturated.",
                    moisture
                ),
                format!("ความชื้นในดิน {:.0}% บริเวณรากอิ่มตัวด้วยน้ำ", moisture),
            ),
        )
        .with_action(
            "Pause scheduled irrigation until moisture drops below 60%",
            "งดการให้น้ำตามรอบจนกว่าความชื้นจะต่ำกว่า 60%",
        )
        .with_action(
            "Clear drainage channels around the field",
            "ขุดลอกร่องระบายน้ำรอบแปลง",
        )
        .with_benefit(
            "Reduces root rot and nutrient leaching",
            "ลดปัญหารากเน่าและการชะล้างธาตุอาหาร",
        );

        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{neutral_scores, with_context};
    use super::*;
    use crate::models::{EnvironmentReading, FieldSnapshots, SubScores};

    fn snapshots(moisture: Option<f64>) -> FieldSnapshots {
        FieldSnapshots {
            environment: Some(EnvironmentReading {
                soil_moisture_percent: moisture,
                weather: None,
            }),
            ..Default::default()
        }
    }

    fn hydration(score: u8) -> SubScores {
        SubScores {
            hydration: score,
            ..neutral_scores()
        }
    }

    #[test]
    fn increase_when_dry() {
        let rec = with_context(&snapshots(Some(12.0)), hydration(20), |ctx| {
            IncreaseIrrigationRule.evaluate(ctx)
        })
        .unwrap();
        assert_eq!(rec.priority, Priority::Urgent);
        assert!(rec.description.en.contains("12%"));
    }

    #[test]
    fn increase_threshold() {
        let fires = |score| {
            with_context(&snapshots(None), hydration(score), |ctx| {
                IncreaseIrrigationRule.evaluate(ctx).is_some()
            })
        };
        assert!(fires(39));
        assert!(!fires(40));
    }

    #[test]
    fn waterlogged_field_fires_both_irrigation_rules() {
        let snaps = snapshots(Some(90.0));
        let increase = with_context(&snaps, hydration(30), |ctx| {
            IncreaseIrrigationRule.evaluate(ctx)
        });
        let reduce = with_context(&snaps, hydration(30), |ctx| {
            ReduceIrrigationRule.evaluate(ctx)
        });
        assert_eq!(increase.map(|r| r.priority), Some(Priority::Urgent));
        assert_eq!(reduce.map(|r| r.priority), Some(Priority::High));
    }

    #[test]
    fn reduce_threshold() {
        let fires = |m| {
            with_context(&snapshots(Some(m)), neutral_scores(), |ctx| {
                ReduceIrrigationRule.evaluate(ctx).is_some()
            })
        };
        assert!(!fires(80.0));
        assert!(fires(80.5));
        assert!(!with_context(&snapshots(None), neutral_scores(), |ctx| {
            ReduceIrrigationRule.evaluate(ctx).is_some()
        }));
    }
}
