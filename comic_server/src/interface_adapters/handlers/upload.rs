use crate::domain::errors::ComicError;
use crate::domain::ports::UploadRequest;
use crate::interface_adapters::http::{ApiError, JsonBody, error_response, map_comic_error};
use crate::interface_adapters::protocol::{UploadAssetRequest, UploadAssetResponse};
use crate::interface_adapters::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use std::sync::Arc;

#[tracing::instrument(
    name = "upload_asset",
    skip_all,
    fields(public_id = ?body.public_id, folder = ?body.folder)
)]
pub async fn upload_asset(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<UploadAssetRequest>,
) -> Result<Json<UploadAssetResponse>, ApiError> {
    let Some(Value::String(encoded)) = body.file_base64 else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "fileBase64 is required and must be a string",
        ));
    };
    let bytes = decode_payload(&encoded).ok_or_else(|| {
        error_response(StatusCode::BAD_REQUEST, "fileBase64 is not valid base64")
    })?;

    let public_id = non_blank(body.public_id);
    let folder = non_blank(body.folder).or_else(|| state.default_upload_folder.clone());
    let file_name = format!("{}.png", public_id.as_deref().unwrap_or("upload"));

    let asset = state
        .storage
        .upload(UploadRequest {
            bytes,
            file_name,
            public_id,
            folder,
        })
        .await
        .map_err(|err| map_comic_error(ComicError::from(err)))?;

    tracing::info!(public_id = %asset.public_id, "asset uploaded");
    Ok(Json(UploadAssetResponse {
        secure_url: asset.secure_url,
        public_id: asset.public_id,
    }))
}

// Accepts bare base64 or a `data:<mime>;base64,` URL. `None` when empty or
// undecodable.
fn decode_payload(encoded: &str) -> Option<Vec<u8>> {
    let trimmed = encoded.trim();
    let data = match trimmed.strip_prefix("data:") {
        Some(rest) => rest.split_once(',')?.1,
        None => trimmed,
    };
    let bytes = BASE64.decode(data.trim()).ok()?;
    (!bytes.is_empty()).then_some(bytes)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
