use regex::Regex;
use serde_json::Value;
use std::sync::{Arc, LazyLock};

use crate::domain::dialogue::{DialogueLine, Speaker};
use crate::domain::errors::ComicError;
use crate::domain::ports::{ChatCompleter, ChatMessage, ChatRequest};
use crate::use_cases::session::SessionContext;

pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const PLACEHOLDER_TEXT: &str = "...";
pub const DEFAULT_COMPANION_NAME: &str = "Companion";

pub const DIALOGUE_SYSTEM_PROMPT: &str = "You write dialogue for a superhero comic panel. \
Write 1-2 short, emotional lines of dialogue for the scene. \
Respond only with a JSON array of objects shaped like {\"text\": \"...\", \"speaker\": \"...\"}, \
where speaker is one of \"hero\", \"companion\" or \"rival\".";

// Span from the first '[' to the last ']'.
static ARRAY_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("array span pattern is valid"));

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueBatch {
    pub lines: Vec<DialogueLine>,
    // Raw model output, kept for debugging.
    pub raw: String,
    // True when the placeholder replaced unusable model output.
    pub degraded: bool,
}

// Requests panel dialogue from the chat-completion collaborator.
#[derive(Clone)]
pub struct DialogueGenerator {
    pub chat: Arc<dyn ChatCompleter>,
    pub temperature: f32,
}

impl DialogueGenerator {
    pub fn new(chat: Arc<dyn ChatCompleter>) -> Self {
        Self {
            chat,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub async fn generate_dialogue(
        &self,
        panel_prompt: &str,
        user_inputs: &Value,
    ) -> Result<DialogueBatch, ComicError> {
        if panel_prompt.trim().is_empty() {
            return Err(ComicError::validation("panelPrompt is required"));
        }

        let inputs = serde_json::to_string_pretty(user_inputs)
            .unwrap_or_else(|_| user_inputs.to_string());
        let request = ChatRequest {
            temperature: self.temperature,
            messages: vec![
                ChatMessage::system(DIALOGUE_SYSTEM_PROMPT),
                ChatMessage::user(format!(
                    "Hero profile from the quiz:\n{inputs}\n\nScene: {}",
                    panel_prompt.trim()
                )),
            ],
        };

        let raw = self.chat.complete(&request).await?;
        Ok(match parse_dialogue(&raw) {
            Some(lines) => DialogueBatch {
                lines,
                raw,
                degraded: false,
            },
            None => {
                tracing::warn!(raw_len = raw.len(), "dialogue output unusable; using placeholder");
                DialogueBatch {
                    lines: placeholder_dialogue(),
                    raw,
                    degraded: true,
                }
            }
        })
    }
}

// Best-effort extraction of a JSON array of lines from free-text model output.
// `None` when no array is present, it does not parse, or it is empty.
pub fn parse_dialogue(raw: &str) -> Option<Vec<DialogueLine>> {
    let span = ARRAY_SPAN.find(raw)?;
    let lines: Vec<DialogueLine> = serde_json::from_str(span.as_str()).ok()?;
    let lines: Vec<DialogueLine> = lines
        .into_iter()
        .filter(|line| !line.text.trim().is_empty())
        .collect();
    (!lines.is_empty()).then_some(lines)
}

// Stand-in so a panel never renders without dialogue.
pub fn placeholder_dialogue() -> Vec<DialogueLine> {
    vec![DialogueLine::new(PLACEHOLDER_TEXT, Speaker::Hero)]
}

// Names the generated speaker labels resolve to at render time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterNames {
    pub hero: String,
    pub rival: String,
    pub companion: String,
}

impl CharacterNames {
    // Companion falls back from the explicit value to the session override to
    // a generic name.
    pub fn resolve(
        hero: impl Into<String>,
        rival: impl Into<String>,
        companion: Option<&str>,
        session: &SessionContext,
    ) -> Self {
        let companion = companion
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| session.companion_name())
            .unwrap_or_else(|| DEFAULT_COMPANION_NAME.to_string());
        Self {
            hero: hero.into(),
            rival: rival.into(),
            companion,
        }
    }

    pub fn display_name(&self, speaker: &Speaker) -> String {
        normalize_speaker(speaker.label(), self)
    }
}

// Role a generated label refers to; unknown labels come back as `Named`.
pub fn speaker_role(label: &str) -> Speaker {
    let lowered = label.trim().to_lowercase();
    let bare = lowered.strip_prefix("the ").unwrap_or(&lowered).trim();

    match bare {
        "" | "hero" | "narrator" | "protagonist" | "main character" => Speaker::Hero,
        "rival" | "villain" | "antagonist" | "nemesis" | "main villain" => Speaker::Rival,
        _ if ["companion", "sidekick", "best friend"]
            .iter()
            .any(|needle| bare.contains(*needle)) =>
        {
            Speaker::Companion
        }
        _ => Speaker::Named(label.trim().to_string()),
    }
}

pub fn normalize_speaker(label: &str, names: &CharacterNames) -> String {
    match speaker_role(label) {
        Speaker::Hero => names.hero.clone(),
        Speaker::Rival => names.rival.clone(),
        Speaker::Companion => names.companion.clone(),
        Speaker::Named(name) => name,
    }
}
