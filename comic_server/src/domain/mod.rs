pub mod consent;
pub mod dialogue;
pub mod errors;
pub mod generation;
pub mod ports;
pub mod quiz;

// Re-export the domain boundary types and ports.
pub use consent::{CONSENT_POLICY_VERSION, ConsentRecord};
pub use dialogue::{DialogueLine, Speaker};
pub use errors::{ComicError, ProviderError, UploadError};
pub use generation::{
    GenerationJob, GenerationParams, GenerationRequest, JobOutcome, JobSnapshot, JobStatus,
};
pub use ports::{
    AssetStorage, ChatCompleter, ChatMessage, ChatRequest, Clock, InferenceProvider,
    KeyValueStore, StoredAsset, UploadRequest,
};
pub use quiz::{QUESTIONS, Question, QuestionKey, QuizAnswers, sanitize_free_text};
