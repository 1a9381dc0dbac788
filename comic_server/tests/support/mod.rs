// Shared primitives for one-time server bootstrapping across integration tests.
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use comic_server::AppState;
use comic_server::domain::{
    AssetStorage, ChatCompleter, ChatRequest, GenerationRequest, InferenceProvider, JobSnapshot,
    JobStatus, ProviderError, StoredAsset, UploadError, UploadRequest,
};
use comic_server::use_cases::{DialogueGenerator, GenerationOrchestrator, PollPolicy};

// Global base URL used by all tests after the server publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Prompts containing this marker make the stub job fail.
pub const FAILING_PROMPT_MARKER: &str = "doomed";

// Inference stub: the first poll settles the job, failing it when the prompt carries the marker.
struct StubInference;

#[async_trait]
impl InferenceProvider for StubInference {
    async fn submit(&self, request: &GenerationRequest) -> Result<JobSnapshot, ProviderError> {
        let id = if request.prompt.contains(FAILING_PROMPT_MARKER) {
            "job-fail"
        } else {
            "job-ok"
        };
        Ok(JobSnapshot {
            id: id.to_string(),
            status: JobStatus::Starting,
            output: None,
        })
    }

    async fn fetch(&self, job_id: &str) -> Result<JobSnapshot, ProviderError> {
        let (status, output) = match job_id {
            "job-ok" => (
                JobStatus::Succeeded,
                Some("https://cdn.test/covers/job-ok.png".to_string()),
            ),
            _ => (JobStatus::Failed, None),
        };
        Ok(JobSnapshot {
            id: job_id.to_string(),
            status,
            output,
        })
    }
}

struct StubChat;

#[async_trait]
impl ChatCompleter for StubChat {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError> {
        let scene = request
            .messages
            .last()
            .map(|message| message.content.as_str())
            .unwrap_or_default();
        if scene.contains("silence") {
            return Ok("I would rather not say anything.".to_string());
        }
        Ok(r#"Here you go: [{"text":"Run!","speaker":"hero"}]"#.to_string())
    }
}

struct StubStorage;

#[async_trait]
impl AssetStorage for StubStorage {
    async fn upload(&self, request: UploadRequest) -> Result<StoredAsset, UploadError> {
        let public_id = request.public_id.unwrap_or_else(|| "generated".to_string());
        Ok(StoredAsset {
            secure_url: format!("https://cdn.test/{public_id}.png"),
            public_id,
        })
    }
}

fn stub_state() -> Arc<AppState> {
    Arc::new(AppState {
        orchestrator: GenerationOrchestrator::new(
            Arc::new(StubInference),
            PollPolicy {
                interval: Duration::from_millis(5),
                max_attempts: 10,
            },
        ),
        dialogue: DialogueGenerator::new(Arc::new(StubChat)),
        storage: Arc::new(StubStorage),
        default_upload_folder: None,
    })
}

// Ensure the test server is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        // Local one-time slot where the server thread publishes its selected URL.
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                comic_server::run(listener, stub_state())
                    .await
                    .expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Wait for URL publication and then wait for the server socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    // Strip the scheme so we can use host:port for raw TCP readiness checks.
    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
