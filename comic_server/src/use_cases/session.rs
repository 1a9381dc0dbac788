use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::domain::ports::KeyValueStore;
use crate::domain::quiz::QuizAnswers;

pub const QUIZ_ANSWERS_KEY: &str = "hero_quiz_answers";
pub const SELFIE_URL_KEY: &str = "hero_selfie_url";
pub const COVER_URL_KEY: &str = "hero_cover_url";
pub const COMPANION_NAME_KEY: &str = "hero_companion_name";
const CONSENT_KEY_PREFIX: &str = "hero_consent_";

pub fn consent_key(policy_version: &str) -> String {
    format!("{CONSENT_KEY_PREFIX}{policy_version}")
}

// Explicit handle over the client-side state of one user session.
//
// A detached context has no storage behind it: reads yield `None` and writes
// are dropped.
#[derive(Clone)]
pub struct SessionContext {
    store: Option<Arc<dyn KeyValueStore>>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn detached() -> Self {
        Self { store: None }
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    pub(crate) fn read(&self, key: &str) -> Option<String> {
        self.store
            .as_ref()?
            .get(key)
            .filter(|value| !value.trim().is_empty())
    }

    pub(crate) fn write(&self, key: &str, value: String) {
        if let Some(store) = &self.store {
            store.set(key, value);
        }
    }

    pub(crate) fn remove(&self, key: &str) {
        if let Some(store) = &self.store {
            store.remove(key);
        }
    }

    pub(crate) fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "ignoring malformed session entry");
                None
            }
        }
    }

    pub(crate) fn write_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.write(key, raw),
            Err(err) => tracing::warn!(key, error = %err, "failed to serialize session entry"),
        }
    }

    pub fn quiz_answers(&self) -> Option<QuizAnswers> {
        self.read_json(QUIZ_ANSWERS_KEY)
    }

    pub fn save_quiz_answers(&self, answers: &QuizAnswers) {
        self.write_json(QUIZ_ANSWERS_KEY, answers);
    }

    pub fn clear_quiz_answers(&self) {
        self.remove(QUIZ_ANSWERS_KEY);
    }

    pub fn selfie_url(&self) -> Option<String> {
        self.read(SELFIE_URL_KEY)
    }

    // A new selfie makes any previously generated cover stale.
    pub fn set_selfie_url(&self, url: impl Into<String>) {
        self.write(SELFIE_URL_KEY, url.into());
        self.remove(COVER_URL_KEY);
    }

    pub fn cover_url(&self) -> Option<String> {
        self.read(COVER_URL_KEY)
    }

    pub fn set_cover_url(&self, url: impl Into<String>) {
        self.write(COVER_URL_KEY, url.into());
    }

    // Drops the durable selfie and everything derived from it.
    pub fn invalidate_selfie(&self) {
        self.remove(SELFIE_URL_KEY);
        self.remove(COVER_URL_KEY);
    }

    pub fn companion_name(&self) -> Option<String> {
        self.read(COMPANION_NAME_KEY).map(|name| name.trim().to_string())
    }

    pub fn set_companion_name(&self, name: impl Into<String>) {
        self.write(COMPANION_NAME_KEY, name.into());
    }
}
