use crate::error::Result;
use crate::models::{FieldHealthScore, Language};

fn label(lang: Language, en: &'static str, th: &'static str) -> &'static str {
    match lang {
        Language::En => en,
        Language::Th => th,
    }
}

fn bar(score: u8) -> String {
    let filled = (score as usize + 5) / 10;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled.min(10)))
}

/// Plain-text report for one field
pub fn render_text(score: &FieldHealthScore, lang: Language) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} {}  {}/100  {}  {}",
        label(lang, "Field", "แปลง"),
        score.field_id,
        score.overall,
        score.grade(),
        score.trend
    ));
    lines.push(format!(
        "  {}",
        score.computed_at.format("%Y-%m-%d %H:%M UTC")
    ));
    lines.push(String::new());

    let rows = [
        (label(lang, "Health", "สุขภาพพืช"), score.health()),
        (label(lang, "Hydration", "ความชื้น"), score.hydration()),
        (label(lang, "Attention", "งานค้าง"), score.attention()),
        (label(lang, "Astral", "ฤกษ์ยาม"), score.astral()),
    ];
    for (name, value) in rows {
        lines.push(format!("  {:<12} {} {:>3}", name, bar(value), value));
    }

    if !score.sources.any_available() {
        lines.push(String::new());
        lines.push(format!(
            "  {}",
            label(
                lang,
                "No source returned data; sub-scores are neutral defaults",
                "ไม่มีข้อมูลจากแหล่งใดเลย ใช้คะแนนกลางแทน"
            )
        ));
    } else if !score.sources.all_available() {
        lines.push(String::new());
        lines.push(format!(
            "  {}: {}",
            label(lang, "No data from", "ไม่มีข้อมูลจาก"),
            score.sources.missing().join(", ")
        ));
    }

    if !score.alerts.is_empty() {
        lines.push(String::new());
        lines.push(label(lang, "Alerts", "การแจ้งเตือน").to_string());
        for alert in &score.alerts {
            lines.push(format!(
                "  {} [{}] {}",
                alert.severity.symbol(),
                alert.severity,
                alert.title.get(lang)
            ));
            lines.push(format!("      {}", alert.message.get(lang)));
        }
    }

    if !score.recommendations.is_empty() {
        lines.push(String::new());
        lines.push(label(lang, "Recommendations", "คำแนะนำ").to_string());
        for rec in &score.recommendations {
            lines.push(format!(
                "  {} [{}] {}",
                rec.priority.symbol(),
                rec.priority,
                rec.title.get(lang)
            ));
            lines.push(format!("      {}", rec.description.get(lang)));
            for action in &rec.action_items {
                lines.push(format!("      - {}", action.get(lang)));
            }
            if let Some(ref benefit) = rec.expected_benefit {
                lines.push(format!("      = {}", benefit.get(lang)));
            }
        }
    }

    lines.join("\n")
}

/// JSON for one score, or an array when several fields were scored
pub fn render_json(scores: &[FieldHealthScore]) -> Result<String> {
    let json = match scores {
        [single] => serde_json::to_string_pretty(single)?,
        many => serde_json::to_string_pretty(many)?,
    };
    Ok(json)
}
