use super::thresholds::ScoringThresholds;
use crate::models::{
    AstronomicalSnapshot, EnvironmentReading, HealthStatus, TaskSnapshot, VegetationReading,
};
use chrono::{DateTime, Utc};

/// Score used when a source contributes nothing
pub const NEUTRAL_SCORE: u8 = 50;
/// Attention score with no outstanding tasks
pub const NO_BACKLOG_SCORE: u8 = 100;

/// Crop vigour from the vegetation index
pub fn health_score(vegetation: Option<&VegetationReading>, t: &ScoringThresholds) -> u8 {
    let Some(reading) = vegetation else {
        return NEUTRAL_SCORE;
    };

    if let Some(status) = reading.health_status {
        return match status {
            HealthStatus::Excellent => 95,
            HealthStatus::Good => 80,
            HealthStatus::Moderate => 60,
            HealthStatus::Poor => 35,
            HealthStatus::Critical => 15,
        };
    }

    let index = reading.mean_index;
    if !index.is_finite() {
        return NEUTRAL_SCORE;
    }

    if index >= t.ndvi_excellent {
        95
    } else if index >= t.ndvi_good {
        75
    } else if index >= t.ndvi_moderate {
        50
    } else if index >= t.ndvi_poor {
        25
    } else {
        10
    }
}

/// Water status from soil moisture, adjusted for current weather
pub fn hydration_score(environment: Option<&EnvironmentReading>, t: &ScoringThresholds) -> u8 {
    let Some(env) = environment else {
        return NEUTRAL_SCORE;
    };

    let mut score: i32 = NEUTRAL_SCORE as i32;

    if let Some(moisture) = env.soil_moisture_percent.filter(|m| m.is_finite()) {
        score = if moisture >= t.moisture_optimal_min && moisture <= t.moisture_optimal_max {
            90
        } else if moisture < t.moisture_critical_low {
            20
        } else if moisture > t.moisture_critical_high {
            // Waterlogging risk
            30
        } else if moisture < t.moisture_optimal_min {
            60
        } else {
            70
        };
    }

    if let Some(weather) = &env.weather {
        if weather.temperature_c > t.heat_stress_temp_c
            && weather.humidity_percent < t.heat_stress_humidity
        {
            score -= 15;
        } else if weather.humidity_percent >= t.comfortable_humidity_min
            && weather.humidity_percent <= t.comfortable_humidity_max
        {
            score += 5;
        }
    }

    score.clamp(0, 100) as u8
}

/// How much outstanding work the field is carrying
pub fn attention_score(
    tasks: Option<&TaskSnapshot>,
    now: DateTime<Utc>,
    t: &ScoringThresholds,
) -> u8 {
    let Some(snapshot) = tasks.filter(|s| !s.tasks.is_empty()) else {
        return NO_BACKLOG_SCORE;
    };

    let mut score: i32 = 100;

    let overdue = snapshot.overdue_count(now);
    if overdue >= t.overdue_critical {
        score -= 50;
    } else if overdue >= t.overdue_warning {
        score -= 25;
    } else {
        score -= 10 * overdue as i32;
    }

    let pending = snapshot.pending_count();
    if pending >= t.pending_high {
        score -= 20;
    } else if pending > t.pending_elevated {
        score -= 10;
    }

    if snapshot
        .completion_rate()
        .is_some_and(|rate| rate > t.completion_bonus_rate)
    {
        score += 10;
    }

    score.clamp(0, 100) as u8
}

/// Farming suitability from the lunar calendar
pub fn astral_score(astronomical: Option<&AstronomicalSnapshot>) -> u8 {
    let Some(snapshot) = astronomical else {
        return NEUTRAL_SCORE;
    };

    if let Some(score) = snapshot.overall_farming_score.filter(|s| s.is_finite()) {
        return score.round().clamp(0.0, 100.0) as u8;
    }

    let mut score = NEUTRAL_SCORE as f64;

    if snapshot.moon_phase_favorable == Some(true) {
        score += 20.0;
    }

    if let Some(mansion) = snapshot.lunar_mansion_score.filter(|s| s.is_finite()) {
        score += mansion.clamp(0.0, 10.0) / 10.0 * 30.0;
    }

    score.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldTask, TaskStatus, WeatherConditions, WeatherSource};
    use chrono::Duration;
    use proptest::prelude::*;

    fn veg(index: f64) -> VegetationReading {
        VegetationReading::new("f", index)
    }

    fn env(moisture: Option<f64>, weather: Option<(f64, f64)>) -> EnvironmentReading {
        EnvironmentReading {
            soil_moisture_percent: moisture,
            weather: weather.map(|(t, h)| WeatherConditions::new(t, h, WeatherSource::FarmApi)),
        }
    }

    fn overdue_tasks(n: usize, now: DateTime<Utc>) -> Vec<FieldTask> {
        (0..n)
            .map(|i| {
                FieldTask::new(format!("o{}", i), "late", TaskStatus::Open)
                    .due(now - Duration::days(1))
            })
            .collect()
    }

    #[test]
    fn health_absent_is_neutral() {
        assert_eq!(health_score(None, &ScoringThresholds::default()), 50);
    }

    #[test]
    fn health_status_overrides_index() {
        let t = ScoringThresholds::default();
        let cases = [
            (HealthStatus::Excellent, 95),
            (HealthStatus::Good, 80),
            (HealthStatus::Moderate, 60),
            (HealthStatus::Poor, 35),
            (HealthStatus::Critical, 15),
        ];
        for (status, expected) in cases {
            let reading = veg(0.9).with_status(status);
            assert_eq!(health_score(Some(&reading), &t), expected, "{:?}", status);
        }
    }

    #[test]
    fn health_index_breakpoints() {
        let t = ScoringThresholds::default();
        assert_eq!(health_score(Some(&veg(0.7)), &t), 95);
        assert_eq!(health_score(Some(&veg(0.69)), &t), 75);
        assert_eq!(health_score(Some(&veg(0.5)), &t), 75);
        assert_eq!(health_score(Some(&veg(0.49)), &t), 50);
        assert_eq!(health_score(Some(&veg(0.3)), &t), 50);
        assert_eq!(health_score(Some(&veg(0.29)), &t), 25);
        assert_eq!(health_score(Some(&veg(0.15)), &t), 25);
        assert_eq!(health_score(Some(&veg(0.14)), &t), 10);
        assert_eq!(health_score(Some(&veg(-0.4)), &t), 10);
    }

    #[test]
    fn health_non_finite_index_is_neutral() {
        let t = ScoringThresholds::default();
        assert_eq!(health_score(Some(&veg(f64::NAN)), &t), 50);
    }

    #[test]
    fn hydration_moisture_bands() {
        let t = ScoringThresholds::default();
        let score = |m: f64| hydration_score(Some(&env(Some(m), None)), &t);

        assert_eq!(score(45.0), 90);
        assert_eq!(score(30.0), 90);
        assert_eq!(score(60.0), 90);
        assert_eq!(score(19.0), 20);
        assert_eq!(score(20.0), 60);
        assert_eq!(score(25.0), 60);
        assert_eq!(score(70.0), 70);
        assert_eq!(score(80.0), 70);
        assert_eq!(score(81.0), 30);
    }

    #[test]
    fn hydration_absent_inputs() {
        let t = ScoringThresholds::default();
        assert_eq!(hydration_score(None, &t), 50);
        assert_eq!(hydration_score(Some(&env(None, None)), &t), 50);
        // Weather alone still adjusts the base
        assert_eq!(hydration_score(Some(&env(None, Some((25.0, 60.0)))), &t), 55);
    }

    #[test]
    fn hydration_heat_stress_subtracts_fifteen() {
        let t = ScoringThresholds::default();
        let calm = hydration_score(Some(&env(Some(50.0), None)), &t);
        let hot = hydration_score(Some(&env(Some(50.0), Some((36.0, 25.0)))), &t);
        assert_eq!(calm, 90);
        assert_eq!(hot, 75);
        assert_eq!(calm - hot, 15);

        let critical_low = hydration_score(Some(&env(Some(5.0), Some((40.0, 10.0)))), &t);
        assert_eq!(critical_low, 5);
    }

    #[test]
    fn hydration_comfortable_humidity_bonus() {
        let t = ScoringThresholds::default();
        assert_eq!(
            hydration_score(Some(&env(Some(45.0), Some((30.0, 55.0)))), &t),
            95
        );
        assert_eq!(
            hydration_score(Some(&env(Some(45.0), Some((30.0, 70.0)))), &t),
            95
        );
        assert_eq!(
            hydration_score(Some(&env(Some(45.0), Some((30.0, 75.0)))), &t),
            90
        );
    }

    #[test]
    fn attention_empty_backlog() {
        let t = ScoringThresholds::default();
        let now = Utc::now();
        assert_eq!(attention_score(None, now, &t), 100);
        assert_eq!(
            attention_score(Some(&TaskSnapshot::default()), now, &t),
            100
        );
    }

    #[test]
    fn attention_five_overdue() {
        let t = ScoringThresholds::default();
        let now = Utc::now();
        let snapshot = TaskSnapshot::new(overdue_tasks(5, now));
        assert_eq!(attention_score(Some(&snapshot), now, &t), 50);
    }

    #[test]
    fn attention_ten_pending_not_overdue() {
        let t = ScoringThresholds::default();
        let now = Utc::now();
        let tasks = (0..10)
            .map(|i| {
                FieldTask::new(format!("p{}", i), "upcoming", TaskStatus::InProgress)
                    .due(now + Duration::days(3))
            })
            .collect();
        assert_eq!(
            attention_score(Some(&TaskSnapshot::new(tasks)), now, &t),
            80
        );
    }

    #[test]
    fn attention_small_overdue_counts() {
        let t = ScoringThresholds::default();
        let now = Utc::now();
        let one = TaskSnapshot::new(overdue_tasks(1, now));
        assert_eq!(attention_score(Some(&one), now, &t), 90);
        let three = TaskSnapshot::new(overdue_tasks(3, now));
        assert_eq!(attention_score(Some(&three), now, &t), 75);
    }

    #[test]
    fn attention_completion_bonus_is_clamped() {
        let t = ScoringThresholds::default();
        let now = Utc::now();
        let tasks = (0..9)
            .map(|i| FieldTask::new(format!("c{}", i), "done", TaskStatus::Completed))
            .chain(std::iter::once(FieldTask::new("x", "left", TaskStatus::Cancelled)))
            .collect();
        // 0.9 completion: 100 + 10 clamps to 100
        assert_eq!(
            attention_score(Some(&TaskSnapshot::new(tasks)), now, &t),
            100
        );
    }

    #[test]
    fn astral_explicit_score_wins() {
        let snapshot = AstronomicalSnapshot::default()
            .with_score(72.6)
            .with_moon_phase("Waxing Crescent", true);
        assert_eq!(astral_score(Some(&snapshot)), 73);
        let over = AstronomicalSnapshot::default().with_score(140.0);
        assert_eq!(astral_score(Some(&over)), 100);
    }

    #[test]
    fn astral_composed_from_signals() {
        assert_eq!(astral_score(None), 50);
        assert_eq!(astral_score(Some(&AstronomicalSnapshot::default())), 50);

        let favorable = AstronomicalSnapshot::default().with_moon_phase("Full Moon", true);
        assert_eq!(astral_score(Some(&favorable)), 70);

        let both = favorable.clone().with_mansion("Rohini", 10.0);
        assert_eq!(astral_score(Some(&both)), 100);

        let half = AstronomicalSnapshot::default().with_mansion("Krittika", 5.0);
        assert_eq!(astral_score(Some(&half)), 65);

        let unfavorable = AstronomicalSnapshot::default()
            .with_moon_phase("New Moon", false)
            .with_mansion("Bharani", 42.0);
        assert_eq!(astral_score(Some(&unfavorable)), 80);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_health_monotonic_in_index(a in -1.0f64..=1.0, b in -1.0f64..=1.0) {
            let t = ScoringThresholds::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(health_score(Some(&veg(lo)), &t) <= health_score(Some(&veg(hi)), &t));
        }

        #[test]
        fn prop_hydration_bounded(
            moisture in proptest::option::of(-50.0f64..150.0),
            temp in -20.0f64..55.0,
            humidity in 0.0f64..100.0,
        ) {
            let t = ScoringThresholds::default();
            let score = hydration_score(Some(&env(moisture, Some((temp, humidity)))), &t);
            prop_assert!(score <= 100);
        }

        #[test]
        fn prop_astral_bounded(mansion in -5.0f64..20.0, favorable in any::<bool>()) {
            let snapshot = AstronomicalSnapshot::default()
                .with_moon_phase("any", favorable)
                .with_mansion("any", mansion);
            prop_assert!(astral_score(Some(&snapshot)) <= 100);
        }
    }
}
