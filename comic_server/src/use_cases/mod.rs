pub mod consent;
pub mod cover_prompt;
pub mod dialogue;
pub mod generation;
pub mod panel;
pub mod quiz;
pub mod selfie;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use consent::ConsentStore;
pub use cover_prompt::cover_prompt;
pub use dialogue::{
    CharacterNames, DialogueBatch, DialogueGenerator, normalize_speaker, parse_dialogue,
    placeholder_dialogue,
};
pub use generation::{GenerationOrchestrator, PollPolicy};
pub use panel::{Overlay, Tone, panel_overlays};
pub use quiz::{KeyPress, QuizCollector, StepOutcome};
pub use selfie::SelfieFlow;
pub use session::SessionContext;
