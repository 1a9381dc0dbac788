use serde::Serialize;

use crate::domain::dialogue::{DialogueLine, Speaker};
use crate::use_cases::dialogue::{CharacterNames, speaker_role};

// Bubble colour family for a speaker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Hero,
    Companion,
    Rival,
    Cameo,
}

impl Tone {
    pub fn color(self) -> &'static str {
        match self {
            Tone::Hero => "#facc15",
            Tone::Companion => "#38bdf8",
            Tone::Rival => "#ef4444",
            Tone::Cameo => "#e5e7eb",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub speaker: String,
    pub text: String,
    pub tone: Tone,
}

// Dialogue overlays for one panel, in line order, with speakers resolved to
// character names.
pub fn panel_overlays(lines: &[DialogueLine], names: &CharacterNames) -> Vec<Overlay> {
    lines
        .iter()
        .map(|line| {
            let tone = match speaker_role(line.speaker.label()) {
                Speaker::Hero => Tone::Hero,
                Speaker::Companion => Tone::Companion,
                Speaker::Rival => Tone::Rival,
                Speaker::Named(_) => Tone::Cameo,
            };
            Overlay {
                speaker: names.display_name(&line.speaker),
                text: line.text.trim().to_string(),
                tone,
            }
        })
        .collect()
}
