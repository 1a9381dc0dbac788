use crate::interface_adapters::http::{ApiError, JsonBody, map_comic_error};
use crate::interface_adapters::protocol::{DialogueRequest, DialogueResponse};
use crate::interface_adapters::state::AppState;
use axum::{Json, extract::State};
use std::sync::Arc;

#[tracing::instrument(
    name = "generate_dialogue",
    skip_all,
    fields(prompt_len = body.panel_prompt.len())
)]
pub async fn generate_dialogue(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<DialogueRequest>,
) -> Result<Json<DialogueResponse>, ApiError> {
    let batch = state
        .dialogue
        .generate_dialogue(&body.panel_prompt, &body.user_inputs)
        .await
        .map_err(map_comic_error)?;

    tracing::info!(lines = batch.lines.len(), degraded = batch.degraded, "dialogue generated");
    Ok(Json(DialogueResponse {
        dialogue: batch.lines,
        raw: batch.raw,
    }))
}
