use crate::domain::quiz::QUESTIONS;
use crate::interface_adapters::http::{ApiError, JsonBody, error_response, map_comic_error};
use crate::interface_adapters::protocol::{
    GenerateCoverRequest, GenerateMultiRequest, GenerateResponse,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::cover_prompt;
use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

#[tracing::instrument(
    name = "generate_cover",
    skip_all,
    fields(selfie_url = %body.selfie_url)
)]
pub async fn generate_cover(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<GenerateCoverRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    // Every quiz answer feeds the prompt template.
    if let Some(index) = body.answers.first_missing() {
        let key = QUESTIONS[index].key.as_str();
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("{key} is required"),
        ));
    }

    let prompt = cover_prompt(&body.answers);
    let comic_image_url = state
        .orchestrator
        .generate(&prompt, &body.selfie_url)
        .await
        .map_err(map_comic_error)?;

    tracing::info!("cover generated");
    Ok(Json(GenerateResponse { comic_image_url }))
}

#[tracing::instrument(
    name = "generate_multi",
    skip_all,
    fields(selfie_url = %body.selfie_url, prompt_len = body.prompt.len())
)]
pub async fn generate_multi(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<GenerateMultiRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    // The panel prompt is used as sent, minus surrounding whitespace.
    let comic_image_url = state
        .orchestrator
        .generate(&body.prompt, &body.selfie_url)
        .await
        .map_err(map_comic_error)?;

    tracing::info!("panel generated");
    Ok(Json(GenerateResponse { comic_image_url }))
}
