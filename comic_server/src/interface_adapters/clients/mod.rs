// The clients defined here are reqwest clients for the external collaborators.
pub mod cloudinary;
pub mod openai;
pub mod replicate;

pub use cloudinary::{CloudinaryClient, CloudinaryConfig, CloudinaryCredentials};
pub use openai::OpenAiClient;
pub use replicate::ReplicateClient;

use std::time::Duration;

// Upstream bodies are logged and echoed in errors; keep them short.
const MAX_ERROR_BODY_CHARS: usize = 512;

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

// Reads an error body without failing the caller when the body is unreadable.
pub(crate) async fn error_body(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    truncate(body.trim(), MAX_ERROR_BODY_CHARS)
}

pub(crate) fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &value[..index]),
        None => value.to_string(),
    }
}

pub(crate) fn trim_base_url(value: impl Into<String>) -> String {
    value.into().trim().trim_end_matches('/').to_string()
}

// Stub upstream for exercising the clients over real HTTP.
#[cfg(test)]
pub(crate) async fn spawn_stub_upstream(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub upstream");
    let addr = listener.local_addr().expect("stub upstream addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_values_and_cuts_long_ones_on_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }

    #[test]
    fn trailing_slashes_are_removed_from_base_urls() {
        assert_eq!(trim_base_url(" https://api.test/v1// "), "https://api.test/v1");
    }
}
