use crate::interface_adapters::handlers::{
    generate_cover, generate_dialogue, generate_multi, upload_asset,
};
use crate::interface_adapters::state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use std::sync::Arc;

// Selfies arrive base64-encoded in JSON, well above axum's 2 MB default.
const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

pub fn app(state: Arc<AppState>) -> Router {
    // Wire the HTTP routes to their handlers.
    Router::new()
        .route("/api/generate", post(generate_cover))
        .route("/api/generate-multi", post(generate_multi))
        .route("/api/generate-dialogue", post(generate_dialogue))
        .route("/api/cloudinary-upload", post(upload_asset))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
