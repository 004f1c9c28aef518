use super::thresholds::{weights, ScoringThresholds};
use crate::models::{SubScores, Trend, VegetationReading};

/// Weighted sum of the sub-scores, rounded half up.
///
/// Computed in integer hundredths so 91.5 always rounds to 92 regardless of
/// how the weights would be represented as floats.
pub fn overall_score(scores: &SubScores) -> u8 {
    let weighted = scores.health as u32 * weights::HEALTH
        + scores.hydration as u32 * weights::HYDRATION
        + scores.attention as u32 * weights::ATTENTION
        + scores.astral as u32 * weights::ASTRAL;

    ((weighted + 50) / 100).min(100) as u8
}

/// Upstream trend hint if there is one, otherwise inferred from health alone.
///
/// Without a hint this never reports `Improving`; there is no score history
/// to compare against.
pub fn classify_trend(
    vegetation: Option<&VegetationReading>,
    health: u8,
    t: &ScoringThresholds,
) -> Trend {
    if let Some(hint) = vegetation.and_then(|v| v.trend_hint) {
        return hint;
    }

    if health >= t.health_warning {
        Trend::Stable
    } else {
        Trend::Declining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(health: u8, hydration: u8, attention: u8, astral: u8) -> SubScores {
        SubScores {
            health,
            hydration,
            attention,
            astral,
        }
    }

    fn float_weighted(s: &SubScores) -> f64 {
        s.health as f64 * 0.35 + s.hydration as f64 * 0.35 + s.attention as f64 * 0.20
            + s.astral as f64 * 0.10
    }

    #[test]
    fn overall_at_boundaries() {
        for h in [0u8, 50, 100] {
            for y in [0u8, 50, 100] {
                for a in [0u8, 50, 100] {
                    for s in [0u8, 50, 100] {
                        let sub = scores(h, y, a, s);
                        let expected = (float_weighted(&sub) + 1e-9).round() as u8;
                        assert_eq!(overall_score(&sub), expected, "{:?}", sub);
                    }
                }
            }
        }
    }

    #[test]
    fn overall_rounds_half_up() {
        // 33.25 + 33.25 + 20 + 5 = 91.5
        assert_eq!(overall_score(&scores(95, 95, 100, 50)), 92);
        // 17.5 + 17.5 + 20 + 5 = 60
        assert_eq!(overall_score(&scores(50, 50, 100, 50)), 60);
        assert_eq!(overall_score(&scores(100, 100, 100, 100)), 100);
        assert_eq!(overall_score(&scores(0, 0, 0, 0)), 0);
    }

    #[test]
    fn trend_uses_hint_verbatim() {
        let t = ScoringThresholds::default();
        let reading = VegetationReading::new("f", 0.1).with_trend(Trend::Improving);
        assert_eq!(classify_trend(Some(&reading), 10, &t), Trend::Improving);
    }

    #[test]
    fn trend_inferred_from_health() {
        let t = ScoringThresholds::default();
        assert_eq!(classify_trend(None, 50, &t), Trend::Stable);
        assert_eq!(classify_trend(None, 95, &t), Trend::Stable);
        assert_eq!(classify_trend(None, 49, &t), Trend::Declining);

        let no_hint = VegetationReading::new("f", 0.1);
        assert_eq!(classify_trend(Some(&no_hint), 10, &t), Trend::Declining);
    }
}
