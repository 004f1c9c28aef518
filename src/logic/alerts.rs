use super::context::ScoringContext;
use crate::models::{AlertCategory, AlertSeverity, FieldAlert, LocalizedText};

/// Evaluate the alert table. Each row is checked independently and alerts
/// come out in table order: crop health, soil moisture, task backlog.
pub fn generate_alerts(ctx: &ScoringContext<'_>) -> Vec<FieldAlert> {
    let mut alerts = Vec::new();

    alerts.extend(crop_health_alert(ctx));
    alerts.extend(soil_moisture_alert(ctx));
    alerts.extend(overdue_tasks_alert(ctx));

    if !alerts.is_empty() {
        tracing::debug!(
            field = ctx.field_id,
            count = alerts.len(),
            "Generated field alerts"
        );
    }

    alerts
}

fn crop_health_alert(ctx: &ScoringContext<'_>) -> Option<FieldAlert> {
    let t = ctx.thresholds;
    let health = ctx.scores.health;

    if health < t.health_critical {
        Some(
            FieldAlert::new(
                ctx.field_id,
                "crop_health_critical",
                AlertSeverity::Critical,
                AlertCategory::CropHealth,
                LocalizedText::new("Crop Health Critical", "สุขภาพพืชวิกฤต"),
                LocalizedText::new(
                    format!(
                        "Health score {} is below {}. Vegetation is severely stressed.",
                        health, t.health_critical
                    ),
                    format!(
                        "คะแนนสุขภาพ {} ต่ำกว่า {} พืชอยู่ในภาวะเครียดรุนแรง",
                        health, t.health_critical
                    ),
                ),
                ctx.now,
            )
            .with_measurement(health as f64, t.health_critical as f64),
        )
    } else if health < t.health_warning {
        Some(
            FieldAlert::new(
                ctx.field_id,
                "crop_health_warning",
                AlertSeverity::Warning,
                AlertCategory::CropHealth,
                LocalizedText::new("Crop Health Declining", "สุขภาพพืชลดลง"),
                LocalizedText::new(
                    format!(
                        "Health score {} is below {}. Inspect the field for stress.",
                        health, t.health_warning
                    ),
                    format!(
                        "คะแนนสุขภาพ {} ต่ำกว่า {} ควรตรวจแปลงหาสาเหตุ",
                        health, t.health_warning
                    ),
                ),
                ctx.now,
            )
            .with_measurement(health as f64, t.health_warning as f64),
        )
    } else {
        None
    }
}

fn soil_moisture_alert(ctx: &ScoringContext<'_>) -> Option<FieldAlert> {
    let t = ctx.thresholds;
    let moisture = ctx.soil_moisture()?;

    if moisture < t.moisture_critical_low {
        Some(
            FieldAlert::new(
                ctx.field_id,
                "soil_moisture_low",
                AlertSeverity::Critical,
                AlertCategory::Irrigation,
                LocalizedText::new("Soil Moisture Critically Low", "ความชื้นในดินต่ำวิกฤต"),
                LocalizedText::new(
                    format!(
                        "Soil moisture is {:.0}%, below the {:.0}% minimum.",
                        moisture, t.moisture_critical_low
                    ),
                    format!(
                        "ความชื้นในดิน {:.0}% ต่ำกว่าขั้นต่ำ {:.0}%",
                        moisture, t.moisture_critical_low
                    ),
                ),
                ctx.now,
            )
            .with_measurement(moisture, t.moisture_critical_low),
        )
    } else if moisture > t.moisture_critical_high {
        Some(
            FieldAlert::new(
                ctx.field_id,
                "soil_moisture_high",
                AlertSeverity::Warning,
                AlertCategory::Irrigation,
                LocalizedText::new("Soil Waterlogged", "ดินชุ่มน้ำเกินไป"),
                LocalizedText::new(
                    format!(
                        "Soil moisture is {:.0}%, above {:.0}%. Roots risk oxygen starvation.",
                        moisture, t.moisture_critical_high
                    ),
                    format!(
                        "ความชื้นในดิน {:.0}% สูงกว่า {:.0}% รากเสี่ยงขาดออกซิเจน",
                        moisture, t.moisture_critical_high
                    ),
                ),
                ctx.now,
            )
            .with_measurement(moisture, t.moisture_critical_high),
        )
    } else {
        None
    }
}

fn overdue_tasks_alert(ctx: &ScoringContext<'_>) -> Option<FieldAlert> {
    let t = ctx.thresholds;
    let overdue = ctx.overdue_count();

    if overdue >= t.overdue_critical {
        Some(
            FieldAlert::new(
                ctx.field_id,
                "tasks_overdue_critical",
                AlertSeverity::Critical,
                AlertCategory::System,
                LocalizedText::new("Many Tasks Overdue", "งานค้างเกินกำหนดจำนวนมาก"),
                LocalizedText::new(
                    format!("{} field tasks are past their due date.", overdue),
                    format!("มีงานในแปลง {} งานที่เลยกำหนดแล้ว", overdue),
                ),
                ctx.now,
            )
            .with_measurement(overdue as f64, t.overdue_critical as f64),
        )
    } else if overdue >= t.overdue_warning {
        Some(
            FieldAlert::new(
                ctx.field_id,
                "tasks_overdue_warning",
                AlertSeverity::Warning,
                AlertCategory::System,
                LocalizedText::new("Tasks Overdue", "มีงานเลยกำหนด"),
                LocalizedText::new(
                    format!("{} field tasks are past their due date.", overdue),
                    format!("มีงานในแปลง {} งานที่เลยกำหนดแล้ว", overdue),
                ),
                ctx.now,
            )
            .with_measurement(overdue as f64, t.overdue_warning as f64),
        )
    } else {
        None
    }
}
