use serde::Serialize;
use std::fmt;

// Status of an inference job as reported by the generation collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    // Any status string the collaborator invents; treated as terminal.
    Other(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "starting" => JobStatus::Starting,
            "processing" => JobStatus::Processing,
            "succeeded" => JobStatus::Succeeded,
            "failed" => JobStatus::Failed,
            "canceled" | "cancelled" => JobStatus::Canceled,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Starting => "starting",
            JobStatus::Processing => "processing",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Canceled => "canceled",
            JobStatus::Other(value) => value,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, JobStatus::Starting | JobStatus::Processing)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Remote view of a job returned by submit and poll calls.
#[derive(Clone, Debug)]
pub struct JobSnapshot {
    pub id: String,
    pub status: JobStatus,
    pub output: Option<String>,
}

// Tagged result of observing a job until it stops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    Succeeded(String),
    // Terminal without a usable output; carries the last observed status.
    Failed(JobStatus),
    // Attempt budget exhausted while the job was still pending.
    TimedOut(JobStatus),
}

// Fixed generation parameters sent with every cover request.
#[derive(Clone, Debug, Serialize)]
pub struct GenerationParams {
    pub aspect_ratio: String,
    pub output_format: String,
    pub guidance_scale: f32,
    pub num_inference_steps: u32,
    pub safety_tolerance: u8,
    pub prompt_upsampling: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            aspect_ratio: "match_input_image".to_string(),
            output_format: "png".to_string(),
            guidance_scale: 3.5,
            num_inference_steps: 28,
            safety_tolerance: 2,
            prompt_upsampling: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub prompt: String,
    pub input_image: String,
    pub params: GenerationParams,
}

// Job record owned by the single request that submitted it.
#[derive(Clone, Debug)]
pub struct GenerationJob {
    pub prompt: String,
    pub input_image_url: String,
    status: JobStatus,
    output_url: Option<String>,
}

impl GenerationJob {
    pub fn new(prompt: impl Into<String>, input_image_url: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            input_image_url: input_image_url.into(),
            status: JobStatus::Starting,
            output_url: None,
        }
    }

    pub fn status(&self) -> &JobStatus {
        &self.status
    }

    // Only ever set while the status is `Succeeded`.
    pub fn output_url(&self) -> Option<&str> {
        self.output_url.as_deref()
    }

    // Applies a remote observation. Terminal jobs ignore further updates and
    // the call returns false.
    pub fn observe(&mut self, snapshot: JobSnapshot) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.output_url = match snapshot.status {
            JobStatus::Succeeded => snapshot.output.filter(|url| !url.trim().is_empty()),
            _ => None,
        };
        self.status = snapshot.status;
        true
    }

    // Outcome once the job is terminal; `None` while it is still pending.
    pub fn outcome(&self) -> Option<JobOutcome> {
        if self.status.is_pending() {
            return None;
        }
        Some(match (&self.status, &self.output_url) {
            (JobStatus::Succeeded, Some(url)) => JobOutcome::Succeeded(url.clone()),
            (status, _) => JobOutcome::Failed(status.clone()),
        })
    }
}
