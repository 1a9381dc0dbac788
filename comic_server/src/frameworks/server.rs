// Framework bootstrap for the comic server runtime.

use crate::domain::ports::Clock;
use crate::frameworks::config;
use crate::interface_adapters::clients::{CloudinaryClient, OpenAiClient, ReplicateClient};
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::storage::SystemClock;
use crate::use_cases::{DialogueGenerator, GenerationOrchestrator, PollPolicy};
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Serves the API on an already bound listener.
pub async fn run(listener: tokio::net::TcpListener, state: Arc<AppState>) -> Result<()> {
    let address = listener.local_addr()?;
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let state = build_state()?;
    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, state).await
}

fn build_state() -> Result<Arc<AppState>> {
    let timeout = config::upstream_timeout();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let replicate_token = config::replicate_api_token();
    if replicate_token.is_none() {
        tracing::warn!(
            "REPLICATE_API_TOKEN is not set; generation requests will be rejected upstream"
        );
    }
    let replicate = ReplicateClient::new(
        config::replicate_api_base(),
        replicate_token,
        config::replicate_model(),
        timeout,
    )
    .map_err(|e| std::io::Error::other(format!("failed to initialize inference client: {e}")))?;
    tracing::debug!(model = %replicate.model, "inference client configured");

    let openai_key = config::openai_api_key();
    if openai_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; dialogue requests will be rejected upstream");
    }
    let openai = OpenAiClient::new(
        config::openai_api_base(),
        openai_key,
        config::openai_model(),
        timeout,
    )
    .map_err(|e| std::io::Error::other(format!("failed to initialize chat client: {e}")))?;
    tracing::debug!(model = %openai.model, "chat client configured");

    let cloudinary_config = config::cloudinary();
    tracing::debug!(
        cloud_name = %cloudinary_config.cloud_name,
        signed = cloudinary_config.credentials.is_some(),
        "upload client configured"
    );
    let cloudinary = CloudinaryClient::new(cloudinary_config, clock, timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize upload client: {e}")))?;

    let mut dialogue = DialogueGenerator::new(Arc::new(openai));
    dialogue.temperature = config::dialogue_temperature();

    Ok(Arc::new(AppState {
        orchestrator: GenerationOrchestrator::new(Arc::new(replicate), PollPolicy::default()),
        dialogue,
        storage: Arc::new(cloudinary),
        default_upload_folder: config::upload_folder(),
    }))
}
