use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::dialogue::DialogueLine;
use crate::domain::quiz::QuizAnswers;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCoverRequest {
    #[serde(flatten)]
    pub answers: QuizAnswers,
    #[serde(default)]
    pub selfie_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMultiRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub selfie_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub comic_image_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueRequest {
    #[serde(default)]
    pub panel_prompt: String,
    #[serde(default)]
    pub user_inputs: Value,
}

#[derive(Debug, Serialize)]
pub struct DialogueResponse {
    pub dialogue: Vec<DialogueLine>,
    pub raw: String,
}

// `fileBase64` stays untyped so a non-string payload is a 400 rather than an
// extractor rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAssetRequest {
    #[serde(default)]
    pub file_base64: Option<Value>,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadAssetResponse {
    pub secure_url: String,
    pub public_id: String,
}
