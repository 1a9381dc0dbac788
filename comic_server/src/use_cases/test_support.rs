use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::errors::{ProviderError, UploadError};
use crate::domain::generation::{GenerationRequest, JobSnapshot, JobStatus};
use crate::domain::ports::{
    AssetStorage, ChatCompleter, ChatRequest, Clock, InferenceProvider, StoredAsset,
    UploadRequest,
};
use crate::domain::quiz::QuizAnswers;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_millis(&self) -> u64 {
        self.0
    }
}

pub(crate) fn complete_answers() -> QuizAnswers {
    QuizAnswers {
        gender: "Woman".to_string(),
        city: "Lagos".to_string(),
        superpower: "Flight".to_string(),
        fear: "deep dark water".to_string(),
        memory: "grandma's kitchen".to_string(),
        strength: "never giving up".to_string(),
        lesson: "kindness is strength".to_string(),
    }
}

// Inference fake that replays a script of poll results.
pub(crate) struct ScriptedInference {
    submitted: JobSnapshot,
    script: Mutex<VecDeque<JobSnapshot>>,
    // Returned once the script runs dry.
    fallback: Option<JobStatus>,
    fail_fetch: bool,
    submits: Mutex<Vec<GenerationRequest>>,
    fetches: Mutex<u32>,
}

impl ScriptedInference {
    pub(crate) fn submitted(status: JobStatus, output: Option<&str>) -> Self {
        Self {
            submitted: snapshot(status, output),
            script: Mutex::new(VecDeque::new()),
            fallback: None,
            fail_fetch: false,
            submits: Mutex::new(Vec::new()),
            fetches: Mutex::new(0),
        }
    }

    pub(crate) fn starting() -> Self {
        Self::submitted(JobStatus::Starting, None)
    }

    pub(crate) fn then(self, status: JobStatus, output: Option<&str>) -> Self {
        self.script
            .lock()
            .expect("script mutex poisoned")
            .push_back(snapshot(status, output));
        self
    }

    pub(crate) fn always(mut self, status: JobStatus) -> Self {
        self.fallback = Some(status);
        self
    }

    pub(crate) fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub(crate) fn fetch_count(&self) -> u32 {
        *self.fetches.lock().expect("fetch counter poisoned")
    }

    pub(crate) fn submit_count(&self) -> usize {
        self.submits.lock().expect("submits mutex poisoned").len()
    }

    pub(crate) fn last_request(&self) -> Option<GenerationRequest> {
        self.submits
            .lock()
            .expect("submits mutex poisoned")
            .last()
            .cloned()
    }
}

fn snapshot(status: JobStatus, output: Option<&str>) -> JobSnapshot {
    JobSnapshot {
        id: "job-1".to_string(),
        status,
        output: output.map(str::to_string),
    }
}

#[async_trait]
impl InferenceProvider for ScriptedInference {
    async fn submit(&self, request: &GenerationRequest) -> Result<JobSnapshot, ProviderError> {
        self.submits
            .lock()
            .expect("submits mutex poisoned")
            .push(request.clone());
        Ok(self.submitted.clone())
    }

    async fn fetch(&self, _job_id: &str) -> Result<JobSnapshot, ProviderError> {
        *self.fetches.lock().expect("fetch counter poisoned") += 1;
        if self.fail_fetch {
            return Err(ProviderError::Transport("connection reset".to_string()));
        }
        let next = self.script.lock().expect("script mutex poisoned").pop_front();
        match (next, &self.fallback) {
            (Some(next_snapshot), _) => Ok(next_snapshot),
            (None, Some(status)) => Ok(snapshot(status.clone(), None)),
            (None, None) => Err(ProviderError::Decode("script exhausted".to_string())),
        }
    }
}

// Storage fake that records uploads and hands out sequential URLs.
pub(crate) struct RecordingStorage {
    uploads: Arc<Mutex<Vec<UploadRequest>>>,
    should_fail: bool,
}

impl RecordingStorage {
    pub(crate) fn new() -> Self {
        Self {
            uploads: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
        }
    }

    pub(crate) fn failing(mut self) -> Self {
        self.should_fail = true;
        self
    }

    pub(crate) fn uploads(&self) -> Vec<UploadRequest> {
        self.uploads.lock().expect("uploads mutex poisoned").clone()
    }
}

#[async_trait]
impl AssetStorage for RecordingStorage {
    async fn upload(&self, request: UploadRequest) -> Result<StoredAsset, UploadError> {
        if self.should_fail {
            return Err(UploadError::Upstream {
                status: 502,
                message: "bad gateway".to_string(),
            });
        }
        let mut guard = self.uploads.lock().expect("uploads mutex poisoned");
        let public_id = request
            .public_id
            .clone()
            .unwrap_or_else(|| format!("asset-{}", guard.len() + 1));
        guard.push(request);
        Ok(StoredAsset {
            secure_url: format!("https://cdn.test/upload-{}.png", guard.len()),
            public_id,
        })
    }
}

// Chat fake returning a fixed completion.
pub(crate) struct CannedChat {
    reply: Option<String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl CannedChat {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn last_request(&self) -> Option<ChatRequest> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .last()
            .cloned()
    }
}

#[async_trait]
impl ChatCompleter for CannedChat {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(request.clone());
        self.reply.clone().ok_or_else(|| ProviderError::Upstream {
            status: 503,
            message: "overloaded".to_string(),
        })
    }
}
