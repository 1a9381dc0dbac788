use serde::{Deserialize, Serialize};

// Who speaks a line. Generated labels outside the three roles are kept as names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Speaker {
    #[default]
    Hero,
    Companion,
    Rival,
    Named(String),
}

impl Speaker {
    pub fn label(&self) -> &str {
        match self {
            Speaker::Hero => "hero",
            Speaker::Companion => "companion",
            Speaker::Rival => "rival",
            Speaker::Named(name) => name,
        }
    }
}

impl From<String> for Speaker {
    fn from(label: String) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "hero" => Speaker::Hero,
            "companion" => Speaker::Companion,
            "rival" => Speaker::Rival,
            _ => Speaker::Named(label.trim().to_string()),
        }
    }
}

impl From<Speaker> for String {
    fn from(speaker: Speaker) -> Self {
        speaker.label().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub text: String,
    #[serde(default)]
    pub speaker: Speaker,
}

impl DialogueLine {
    pub fn new(text: impl Into<String>, speaker: Speaker) -> Self {
        Self {
            text: text.into(),
            speaker,
        }
    }
}
