use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::domain::errors::ProviderError;
use crate::domain::generation::{GenerationParams, GenerationRequest, JobSnapshot, JobStatus};
use crate::domain::ports::InferenceProvider;
use crate::interface_adapters::clients::{error_body, http_client, trim_base_url};

// Thin wrapper around reqwest for the predictions API.
#[derive(Clone)]
pub struct ReplicateClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    pub model: String,
}

#[derive(Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    input_image: &'a str,
    #[serde(flatten)]
    params: &'a GenerationParams,
}

#[derive(Serialize)]
struct PredictionRequest<'a> {
    model: &'a str,
    input: PredictionInput<'a>,
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    id: String,
    status: String,
    #[serde(default)]
    output: Option<Value>,
}

impl PredictionResponse {
    fn into_snapshot(self) -> JobSnapshot {
        JobSnapshot {
            id: self.id,
            status: JobStatus::parse(&self.status),
            output: self.output.as_ref().and_then(first_output_url),
        }
    }
}

// `output` is either a URL or a list of URLs.
fn first_output_url(value: &Value) -> Option<String> {
    match value {
        Value::String(url) if !url.trim().is_empty() => Some(url.trim().to_string()),
        Value::Array(items) => items.iter().find_map(first_output_url),
        _ => None,
    }
}

impl ReplicateClient {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: trim_base_url(base_url),
            token,
            model: model.into(),
        })
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn decode(response: reqwest::Response) -> Result<JobSnapshot, ProviderError> {
        let status = response.status();
        // Keep upstream status/message so failures stay diagnosable.
        if !status.is_success() {
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message: error_body(response).await,
            });
        }
        response
            .json::<PredictionResponse>()
            .await
            .map(PredictionResponse::into_snapshot)
            .map_err(|err| ProviderError::Decode(err.to_string()))
    }
}

#[async_trait]
impl InferenceProvider for ReplicateClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<JobSnapshot, ProviderError> {
        let url = format!("{}/predictions", self.base_url);
        let body = PredictionRequest {
            model: &self.model,
            input: PredictionInput {
                prompt: &request.prompt,
                input_image: &request.input_image,
                params: &request.params,
            },
        };
        let response = self
            .authorized(self.http.post(url))
            .json(&body)
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;
        Self::decode(response).await
    }

    async fn fetch(&self, job_id: &str) -> Result<JobSnapshot, ProviderError> {
        let url = format!("{}/predictions/{job_id}", self.base_url);
        let response = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;
        Self::decode(response).await
    }
}
