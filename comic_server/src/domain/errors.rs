use thiserror::Error;

// Failures surfaced by the object-storage collaborator.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload transport error: {0}")]
    Transport(String),
    #[error("upload rejected with status {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("upload response did not contain a secure url")]
    MissingUrl,
}

// Failures surfaced by the inference and chat-completion collaborators.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider transport error: {0}")]
    Transport(String),
    #[error("provider responded with status {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("provider response could not be decoded: {0}")]
    Decode(String),
}

// Domain-level errors for the comic workflows.
#[derive(Debug, Error)]
pub enum ComicError {
    // Missing or malformed caller input; reported before any network call.
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Upload(#[from] UploadError),
    // The job never reached `succeeded` (or succeeded without output).
    #[error("generation did not succeed (last status: {status})")]
    Generation { status: String },
    #[error("upstream failure: {0}")]
    Upstream(#[from] ProviderError),
}

impl ComicError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
