use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::UploadError;
use crate::domain::ports::{AssetStorage, Clock, StoredAsset, UploadRequest};
use crate::interface_adapters::clients::{error_body, http_client, trim_base_url};

#[derive(Clone, Debug)]
pub struct CloudinaryCredentials {
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Clone, Debug)]
pub struct CloudinaryConfig {
    pub api_base: String,
    pub cloud_name: String,
    pub upload_preset: Option<String>,
    // Present on the server side only; enables signed uploads.
    pub credentials: Option<CloudinaryCredentials>,
}

// Thin wrapper around reqwest for image uploads.
#[derive(Clone)]
pub struct CloudinaryClient {
    http: Client,
    config: CloudinaryConfig,
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
}

impl CloudinaryClient {
    pub fn new(
        config: CloudinaryConfig,
        clock: Arc<dyn Clock>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: http_client(timeout)?,
            config: CloudinaryConfig {
                api_base: trim_base_url(config.api_base.clone()),
                ..config
            },
            clock,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.config.api_base, self.config.cloud_name
        )
    }

    // Text fields of the multipart body, signed when credentials are configured.
    fn form_fields(&self, request: &UploadRequest) -> BTreeMap<&'static str, String> {
        let mut fields = BTreeMap::new();
        if let Some(preset) = &self.config.upload_preset {
            fields.insert("upload_preset", preset.clone());
        }
        if let Some(public_id) = &request.public_id {
            fields.insert("public_id", public_id.clone());
        }
        if let Some(folder) = &request.folder {
            fields.insert("folder", folder.clone());
        }

        if let Some(credentials) = &self.config.credentials {
            let timestamp = self.clock.now_epoch_millis() / 1000;
            fields.insert("timestamp", timestamp.to_string());
            let signature = sign(&fields, &credentials.api_secret);
            fields.insert("api_key", credentials.api_key.clone());
            fields.insert("signature", signature);
            fields.insert("signature_algorithm", "sha256".to_string());
        }
        fields
    }
}

// Hex SHA-256 over the sorted `key=value` pairs joined by '&', followed by the secret.
fn sign(params: &BTreeMap<&'static str, String>, secret: &str) -> String {
    let joined = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl AssetStorage for CloudinaryClient {
    async fn upload(&self, request: UploadRequest) -> Result<StoredAsset, UploadError> {
        let fields = self.form_fields(&request);
        let mut form = Form::new().part(
            "file",
            Part::bytes(request.bytes).file_name(request.file_name),
        );
        for (name, value) in fields {
            form = form.text(name, value);
        }

        let response = self
            .http
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|err| UploadError::Transport(err.to_string()))?;
        let status = response.status();

        if !status.is_success() {
            return Err(UploadError::Upstream {
                status: status.as_u16(),
                message: error_body(response).await,
            });
        }

        let payload = response
            .json::<UploadResponse>()
            .await
            .map_err(|err| UploadError::Transport(err.to_string()))?;
        let secure_url = payload
            .secure_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(UploadError::MissingUrl)?;

        Ok(StoredAsset {
            secure_url,
            public_id: payload.public_id.unwrap_or_default(),
        })
    }
}
