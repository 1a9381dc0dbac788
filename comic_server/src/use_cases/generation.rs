use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::domain::errors::ComicError;
use crate::domain::generation::{
    GenerationJob, GenerationParams, GenerationRequest, JobOutcome, JobStatus,
};
use crate::domain::ports::InferenceProvider;

pub const POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const MAX_POLL_ATTEMPTS: u32 = 60;

// Bounded polling: a fixed pause before each status check, at most
// `max_attempts` checks. The ceiling drifts when status checks are slow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL,
            max_attempts: MAX_POLL_ATTEMPTS,
        }
    }
}

// Submits one inference job and observes it until it stops.
#[derive(Clone)]
pub struct GenerationOrchestrator {
    pub provider: Arc<dyn InferenceProvider>,
    pub policy: PollPolicy,
    pub params: GenerationParams,
}

impl GenerationOrchestrator {
    pub fn new(provider: Arc<dyn InferenceProvider>, policy: PollPolicy) -> Self {
        Self {
            provider,
            policy,
            params: GenerationParams::default(),
        }
    }

    // Resolves to the output image URL or a Generation error with the last
    // observed status.
    pub async fn generate(&self, prompt: &str, selfie_url: &str) -> Result<String, ComicError> {
        match self.run(prompt, selfie_url).await? {
            JobOutcome::Succeeded(url) => Ok(url),
            JobOutcome::Failed(status) | JobOutcome::TimedOut(status) => {
                Err(ComicError::Generation {
                    status: status.to_string(),
                })
            }
        }
    }

    // Dropping the returned future stops observing; the remote job keeps running.
    pub async fn run(&self, prompt: &str, selfie_url: &str) -> Result<JobOutcome, ComicError> {
        validate_inputs(prompt, selfie_url)?;

        let mut job = GenerationJob::new(prompt.trim(), selfie_url.trim());
        let request = GenerationRequest {
            prompt: job.prompt.clone(),
            input_image: job.input_image_url.clone(),
            params: self.params.clone(),
        };

        let submitted = self.provider.submit(&request).await?;
        let job_id = submitted.id.clone();
        job.observe(submitted);
        tracing::info!(job_id = %job_id, status = %job.status(), "generation job submitted");

        let mut attempts = 0;
        while job.status().is_pending() {
            if attempts >= self.policy.max_attempts {
                tracing::warn!(
                    job_id = %job_id,
                    attempts,
                    status = %job.status(),
                    "generation timed out"
                );
                return Ok(JobOutcome::TimedOut(job.status().clone()));
            }
            tokio::time::sleep(self.policy.interval).await;
            attempts += 1;

            let snapshot = self.provider.fetch(&job_id).await?;
            tracing::debug!(
                job_id = %job_id,
                attempt = attempts,
                status = %snapshot.status,
                "polled generation job"
            );
            job.observe(snapshot);
        }

        let outcome = job
            .outcome()
            .unwrap_or_else(|| JobOutcome::Failed(JobStatus::Other("unknown".to_string())));
        match &outcome {
            JobOutcome::Succeeded(_) => {
                tracing::info!(job_id = %job_id, attempts, "generation job succeeded")
            }
            JobOutcome::Failed(status) | JobOutcome::TimedOut(status) => {
                tracing::warn!(
                    job_id = %job_id,
                    attempts,
                    status = %status,
                    "generation job failed"
                )
            }
        }
        Ok(outcome)
    }
}

fn validate_inputs(prompt: &str, selfie_url: &str) -> Result<(), ComicError> {
    if prompt.trim().is_empty() {
        return Err(ComicError::validation("prompt is required"));
    }
    if selfie_url.trim().is_empty() {
        return Err(ComicError::validation("selfieUrl is required"));
    }
    match Url::parse(selfie_url.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ComicError::validation(
            "selfieUrl must be an absolute http(s) URL",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::ScriptedInference;

    const SELFIE: &str = "https://cdn.test/selfie.png";

    fn orchestrator(provider: Arc<ScriptedInference>) -> GenerationOrchestrator {
        GenerationOrchestrator::new(provider, PollPolicy::default())
    }

    #[tokio::test(start_paused = true)]
    async fn when_first_poll_succeeds_then_output_url_is_returned() {
        let provider = Arc::new(
            ScriptedInference::starting().then(JobStatus::Succeeded, Some("X")),
        );

        let url = orchestrator(provider.clone())
            .generate("a hero", SELFIE)
            .await
            .expect("expected generation to succeed");

        assert_eq!(url, "X");
        assert_eq!(provider.fetch_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn when_job_never_finishes_then_fails_after_sixty_polls() {
        let provider = Arc::new(ScriptedInference::starting().always(JobStatus::Processing));

        let result = orchestrator(provider.clone()).generate("a hero", SELFIE).await;

        assert!(matches!(
            result,
            Err(ComicError::Generation { ref status }) if status == "processing"
        ));
        assert_eq!(provider.fetch_count(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn when_job_fails_on_third_poll_then_polling_stops_immediately() {
        let provider = Arc::new(
            ScriptedInference::starting()
                .then(JobStatus::Processing, None)
                .then(JobStatus::Processing, None)
                .then(JobStatus::Failed, None)
                .always(JobStatus::Processing),
        );

        let result = orchestrator(provider.clone()).generate("a hero", SELFIE).await;

        assert!(matches!(
            result,
            Err(ComicError::Generation { ref status }) if status == "failed"
        ));
        assert_eq!(provider.fetch_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn when_succeeded_without_output_then_fails_with_succeeded_status() {
        let provider = Arc::new(ScriptedInference::starting().then(JobStatus::Succeeded, None));

        let outcome = orchestrator(provider)
            .run("a hero", SELFIE)
            .await
            .expect("expected a tagged outcome");

        assert_eq!(outcome, JobOutcome::Failed(JobStatus::Succeeded));
    }

    #[tokio::test(start_paused = true)]
    async fn when_budget_is_exhausted_then_outcome_is_timed_out() {
        let provider = Arc::new(ScriptedInference::starting().always(JobStatus::Starting));
        let orchestrator = GenerationOrchestrator::new(
            provider.clone(),
            PollPolicy {
                interval: Duration::from_millis(10),
                max_attempts: 3,
            },
        );

        let outcome = orchestrator
            .run("a hero", SELFIE)
            .await
            .expect("expected a tagged outcome");

        assert_eq!(outcome, JobOutcome::TimedOut(JobStatus::Starting));
        assert_eq!(provider.fetch_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn polling_waits_one_interval_before_each_status_check() {
        let provider = Arc::new(
            ScriptedInference::starting()
                .then(JobStatus::Processing, None)
                .then(JobStatus::Succeeded, Some("https://cdn.test/cover.png")),
        );
        let started = tokio::time::Instant::now();

        orchestrator(provider)
            .generate("a hero", SELFIE)
            .await
            .expect("expected generation to succeed");

        let elapsed = started.elapsed();
        assert!(elapsed >= POLL_INTERVAL * 2);
        assert!(elapsed < POLL_INTERVAL * 3);
    }

    #[tokio::test]
    async fn when_submission_is_already_terminal_then_no_polling_happens() {
        let provider = Arc::new(ScriptedInference::submitted(
            JobStatus::Succeeded,
            Some("https://cdn.test/cover.png"),
        ));

        let url = orchestrator(provider.clone())
            .generate("a hero", SELFIE)
            .await
            .expect("expected generation to succeed");

        assert_eq!(url, "https://cdn.test/cover.png");
        assert_eq!(provider.fetch_count(), 0);
    }

    #[tokio::test]
    async fn when_inputs_are_blank_then_no_request_is_sent() {
        let provider = Arc::new(ScriptedInference::starting());
        let orchestrator = orchestrator(provider.clone());

        for (prompt, selfie) in [
            ("", SELFIE),
            ("  ", SELFIE),
            ("a hero", ""),
            ("a hero", "not a url"),
        ] {
            let result = orchestrator.generate(prompt, selfie).await;
            assert!(
                matches!(result, Err(ComicError::Validation(_))),
                "{prompt:?} {selfie:?}"
            );
        }
        assert_eq!(provider.submit_count(), 0);
    }

    #[tokio::test]
    async fn when_status_check_fails_then_upstream_error_is_returned() {
        let provider = Arc::new(ScriptedInference::starting().failing_fetch());

        let result = orchestrator(provider).generate("a hero", SELFIE).await;

        assert!(matches!(result, Err(ComicError::Upstream(_))));
    }

    #[tokio::test]
    async fn submitted_request_carries_prompt_selfie_and_fixed_params() {
        let provider = Arc::new(ScriptedInference::submitted(
            JobStatus::Succeeded,
            Some("https://cdn.test/cover.png"),
        ));

        orchestrator(provider.clone())
            .generate("  a hero  ", SELFIE)
            .await
            .expect("expected generation to succeed");

        let request = provider.last_request().expect("expected a submitted request");
        assert_eq!(request.prompt, "a hero");
        assert_eq!(request.input_image, SELFIE);
        assert_eq!(request.params.aspect_ratio, "match_input_image");
        assert!(request.params.prompt_upsampling);
    }
}
