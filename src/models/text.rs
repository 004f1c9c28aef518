use serde::{Deserialize, Serialize};

/// User-facing copy in English and Thai
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub th: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, th: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            th: th.into(),
        }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Th => &self.th,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Th,
}

impl Language {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "th" | "thai" => Some(Language::Th),
            _ => None,
        }
    }
}
