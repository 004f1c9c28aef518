use super::text::LocalizedText;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    Irrigation,
    CropCare,
    Planting,
    Weather,
    General,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::Irrigation => "Irrigation",
            RecommendationType::CropCare => "Crop Care",
            RecommendationType::Planting => "Planting",
            RecommendationType::Weather => "Weather",
            RecommendationType::General => "General",
        }
    }
}

impl std::fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Priority::Low => "·",
            Priority::Medium => "→",
            Priority::High => "⚠",
            Priority::Urgent => "!",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub priority: Priority,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub action_items: Vec<LocalizedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_benefit: Option<LocalizedText>,
}

impl Recommendation {
    pub fn new(
        field_id: &str,
        rule_id: &str,
        kind: RecommendationType,
        priority: Priority,
        title: LocalizedText,
        description: LocalizedText,
    ) -> Self {
        Self {
            id: recommendation_id(field_id, rule_id),
            kind,
            priority,
            title,
            description,
            action_items: Vec::new(),
            expected_benefit: None,
        }
    }

    pub fn with_action(mut self, en: &str, th: &str) -> Self {
        self.action_items.push(LocalizedText::new(en, th));
        self
    }

    pub fn with_benefit(mut self, en: &str, th: &str) -> Self {
        self.expected_benefit = Some(LocalizedText::new(en, th));
        self
    }
}

pub fn recommendation_id(field_id: &str, rule_id: &str) -> String {
    format!("{}:rec:{}", field_id, rule_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_builder_pattern() {
        let rec = Recommendation::new(
            "plot-2",
            "reduce_irrigation",
            RecommendationType::Irrigation,
            Priority::High,
            LocalizedText::new("Reduce irrigation", "ลดการให้น้ำ"),
            LocalizedText::new("Soil is waterlogged", "ดินชุ่มน้ำเกินไป"),
        )
        .with_action("Pause scheduled watering", "งดการให้น้ำตามรอบ")
        .with_action("Open drainage channels", "เปิดร่องระบายน้ำ")
        .with_benefit("Prevents root rot", "ป้องกันรากเน่า");

        assert_eq!(rec.id, "plot-2:rec:reduce_irrigation");
        assert_eq!(rec.action_items.len(), 2);
        assert_eq!(rec.action_items[1].en, "Open drainage channels");
        assert!(rec.expected_benefit.is_some());
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority::Urgent > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn serializes_kind_as_type() {
        let rec = Recommendation::new(
            "f",
            "r",
            RecommendationType::CropCare,
            Priority::Low,
            LocalizedText::new("a", "a"),
            LocalizedText::new("b", "b"),
        );
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "crop_care");
        assert_eq!(json["priority"], "low");
        assert!(json.get("expected_benefit").is_none());
    }
}
