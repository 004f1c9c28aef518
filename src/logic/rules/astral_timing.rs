use super::Rule;
use crate::logic::context::ScoringContext;
use crate::models::{LocalizedText, Priority, Recommendation, RecommendationType};

/// Lunar calendar timing advisory
///
/// Passes the calendar's own top recommendation through when the day is
/// unusually favourable for field work.
///
/// Conditions:
/// - Calendar supplies a top recommendation
/// - Astral sub-score above 70
pub struct AstralTimingRule;

impl Rule for AstralTimingRule {
    fn id(&self) -> &'static str {
        "astral_timing"
    }

    fn name(&self) -> &'static str {
        "Lunar Calendar Timing"
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>) -> Option<Recommendation> {
        let snapshot = ctx.snapshots.astronomical.as_ref()?;
        let advice = snapshot.top_recommendation.as_ref()?;

        let astral = ctx.scores.astral;
        if astral <= ctx.thresholds.astral_favorable {
            return None;
        }

        let mut reasons_en = Vec::new();
        let mut reasons_th = Vec::new();
        if let (Some(phase), Some(true)) = (&snapshot.moon_phase, snapshot.moon_phase_favorable) {
            reasons_en.push(format!("moon phase {}", phase));
            reasons_th.push(format!("ข้างขึ้นข้างแรม {}", phase));
        }
        if let Some(mansion) = &snapshot.lunar_mansion {
            reasons_en.push(format!("lunar mansion {}", mansion));
            reasons_th.push(format!("ฤกษ์ {}", mansion));
        }

        let suffix_en = if reasons_en.is_empty() {
            String::new()
        } else {
            format!(" ({})", reasons_en.join(", "))
        };
        let suffix_th = if reasons_th.is_empty() {
            String::new()
        } else {
            format!(" ({})", reasons_th.join(", "))
        };

        let rec = Recommendation::new(
            ctx.field_id,
            self.id(),
            RecommendationType::Planting,
            Priority::Medium,
            LocalizedText::new("Favourable Day for Field Work", "วันนี้เป็นฤกษ์ดีสำหรับงานเกษตร"),
            LocalizedText::new(
                format!("Farming suitability is {}{}.", astral, suffix_en),
                format!("ความเหมาะสมในการทำเกษตรอยู่ที่ {}{}", astral, suffix_th),
            ),
        )
        .with_action(&advice.en, &advice.th)
        .with_benefit(
            "Aligns planting with the traditional farming calendar",
            "วางแผนการปลูกให้สอดคล้องกับปฏิทินการเกษตรดั้งเดิม",
        );

        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{neutral_scores, with_context};
    use super::*;
    use crate::models::{AstronomicalSnapshot, FieldSnapshots, SubScores};

    fn snapshots(with_advice: bool) -> FieldSnapshots {
        let mut astro = AstronomicalSnapshot::default()
            .with_moon_phase("Waxing Gibbous", true)
            .with_mansion("Rohini", 9.0);
        if with_advice {
            astro = astro.with_recommendation(LocalizedText::new(
                "Transplant seedlings today",
                "ย้ายกล้าวันนี้",
            ));
        }
        FieldSnapshots {
            astronomical: Some(astro),
            ..Default::default()
        }
    }

    fn astral(score: u8) -> SubScores {
        SubScores {
            astral: score,
            ..neutral_scores()
        }
    }

    #[test]
    fn passes_calendar_advice_through() {
        let rec = with_context(&snapshots(true), astral(97), |ctx| {
            AstralTimingRule.evaluate(ctx)
        })
        .unwrap();
        assert_eq!(rec.priority, Priority::Medium);
        assert_eq!(rec.kind, RecommendationType::Planting);
        assert_eq!(rec.action_items[0].en, "Transplant seedlings today");
        assert!(rec.description.en.contains("Rohini"));
    }

    #[test]
    fn needs_advice_and_high_suitability() {
        assert!(with_context(&snapshots(false), astral(97), |ctx| {
            AstralTimingRule.evaluate(ctx)
        })
        .is_none());
        assert!(with_context(&snapshots(true), astral(70), |ctx| {
            AstralTimingRule.evaluate(ctx)
        })
        .is_none());
        assert!(with_context(&FieldSnapshots::default(), astral(97), |ctx| {
            AstralTimingRule.evaluate(ctx)
        })
        .is_none());
    }
}
