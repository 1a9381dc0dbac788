// Shared HTTP response types for consistent API error payloads.
use axum::Json;
use axum::extract::{FromRequest, Request, rejection::JsonRejection};
use axum::http::StatusCode;

use crate::domain::errors::ComicError;

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// JSON body extractor whose rejections use the `{error}` envelope with a 400.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::warn!(error = %rejection, "rejected request body");
                Err(error_response(StatusCode::BAD_REQUEST, rejection.body_text()))
            }
        }
    }
}

// Validation messages are safe to echo; everything else is logged and
// answered with a generic message.
pub fn map_comic_error(err: ComicError) -> ApiError {
    match err {
        ComicError::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
        ComicError::Generation { status } => {
            tracing::error!(status = %status, "image generation failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Image generation failed (status: {status})"),
            )
        }
        ComicError::Upload(err) => {
            tracing::error!(error = %err, "upload failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Upload failed")
        }
        ComicError::Upstream(err) => {
            tracing::error!(error = %err, "upstream request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
