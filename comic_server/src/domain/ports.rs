use async_trait::async_trait;
use serde::Serialize;

use crate::domain::errors::{ProviderError, UploadError};
use crate::domain::generation::{GenerationRequest, JobSnapshot};

// Chat message sent to the completion collaborator. Serializing from the domain
// layer leaks a dependency, but it keeps the adapters thin.
#[derive(Clone, Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChatRequest {
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

// Asset handed to the object-storage collaborator.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub public_id: Option<String>,
    pub folder: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredAsset {
    pub secure_url: String,
    pub public_id: String,
}

// Use cases depend on these traits, not the concrete reqwest clients.
// Dependencies point inwards to the domain layer.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn submit(&self, request: &GenerationRequest) -> Result<JobSnapshot, ProviderError>;
    async fn fetch(&self, job_id: &str) -> Result<JobSnapshot, ProviderError>;
}

#[async_trait]
pub trait AssetStorage: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> Result<StoredAsset, UploadError>;
}

#[async_trait]
pub trait ChatCompleter: Send + Sync {
    // Returns the raw text of the first completion choice.
    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError>;
}

// Client-side key-value storage (the browser's local storage, or a stand-in).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_millis(&self) -> u64;
}
