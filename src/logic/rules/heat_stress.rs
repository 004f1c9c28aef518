use super::Rule;
use crate::logic::context::ScoringContext;
use crate::models::{LocalizedText, Priority, Recommendation, RecommendationType};

/// Heat stress mitigation rule
///
/// Hot, dry air pulls water out of leaves faster than roots can replace it.
///
/// Conditions:
/// - Air temperature above 35°C
/// - Relative humidity below 30%
pub struct HeatStressRule;

impl Rule for HeatStressRule {
    fn id(&self) -> &'static str {
        "heat_stress_mitigation"
    }

    fn name(&self) -> &'static str {
        "Heat Stress Mitigation"
    }

    fn evaluate(&self, ctx: &ScoringContext<'_>) -> Option<Recommendation> {
        if !ctx.heat_stress() {
            return None;
        }
        let weather = ctx.weather()?;

        let rec = Recommendation::new(
            ctx.field_id,
            self.id(),
            RecommendationType::Weather,
            Priority::High,
            LocalizedText::new("Heat Stress Conditions", "สภาวะพืชเครียดจากความร้อน"),
            LocalizedText::new(
                format!(
                    "Temperature {:.1}°C with {:.0}% humidity. Crop water demand is elevated.",
                    weather.temperature_c, weather.humidity_percent
                ),
                format!(
                    "อุณหภูมิ {:.1}°C ความชื้นสัมพัทธ์ {:.0}% พืชต้องการน้ำมากขึ้น",
                    weather.temperature_c, weather.humidity_percent
                ),
            ),
        )
        .with_action(
            "Irrigate before 8 AM to replace overnight losses",
            "ให้น้ำก่อน 8 โมงเช้าเพื่อชดเชยน้ำที่สูญเสีย",
        )
        .with_action(
            "Apply mulch to keep soil temperature down",
            "คลุมดินเพื่อลดอุณหภูมิดิน",
        )
        .with_action(
            "Postpone spraying and fertiliser until temperatures ease",
            "เลื่อนการฉีดพ่นและใส่ปุ๋ยจนกว่าอากาศจะเย็นลง",
        )
        .with_benefit(
            "Limits leaf scorch and flower drop",
            "ลดอาการใบไหม้และดอกร่วง",
        );

        Some(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{neutral_scores, with_context};
    use super::*;
    use crate::models::{EnvironmentReading, FieldSnapshots, WeatherConditions, WeatherSource};

    fn snapshots(temp: f64, humidity: f64) -> FieldSnapshots {
        FieldSnapshots {
            environment: Some(EnvironmentReading {
                soil_moisture_percent: None,
                weather: Some(WeatherConditions::new(temp, humidity, WeatherSource::FarmApi)),
            }),
            ..Default::default()
        }
    }

    fn fires(temp: f64, humidity: f64) -> bool {
        with_context(&snapshots(temp, humidity), neutral_scores(), |ctx| {
            HeatStressRule.evaluate(ctx).is_some()
        })
    }

    #[test]
    fn hot_and_dry() {
        assert!(fires(36.0, 25.0));
        assert!(fires(42.0, 10.0));
    }

    #[test]
    fn needs_both_conditions() {
        assert!(!fires(35.0, 25.0));
        assert!(!fires(36.0, 30.0));
        assert!(!fires(20.0, 10.0));
        assert!(!with_context(&FieldSnapshots::default(), neutral_scores(), |ctx| {
            HeatStressRule.evaluate(ctx).is_some()
        }));
    }
}
