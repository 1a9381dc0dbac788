use std::sync::Arc;
use uuid::Uuid;

use crate::domain::errors::ComicError;
use crate::domain::ports::{AssetStorage, UploadRequest};
use crate::use_cases::consent::ConsentStore;
use crate::use_cases::session::SessionContext;

// Capture, confirm and retake of the selfie that conditions generation.
pub struct SelfieFlow {
    session: SessionContext,
    consent: ConsentStore,
    storage: Arc<dyn AssetStorage>,
    preview: Option<Vec<u8>>,
}

impl SelfieFlow {
    pub fn new(
        session: SessionContext,
        consent: ConsentStore,
        storage: Arc<dyn AssetStorage>,
    ) -> Self {
        Self {
            session,
            consent,
            storage,
            preview: None,
        }
    }

    pub fn preview(&self) -> Option<&[u8]> {
        self.preview.as_deref()
    }

    // Keeps the frame as a local preview. Without consent nothing is captured.
    pub fn capture(&mut self, frame: Vec<u8>) -> Option<&[u8]> {
        if !self.consent.is_granted() {
            tracing::warn!("selfie capture attempted without consent");
            return None;
        }
        self.preview = Some(frame);
        self.preview.as_deref()
    }

    // Uploads the preview and stores the durable URL in the session.
    pub async fn confirm(&mut self) -> Result<String, ComicError> {
        if !self.consent.is_granted() {
            return Err(ComicError::validation("consent is required before uploading"));
        }
        let Some(bytes) = self.preview.clone() else {
            return Err(ComicError::validation("no selfie has been captured"));
        };

        let public_id = format!("selfie-{}", Uuid::new_v4());
        let asset = self
            .storage
            .upload(UploadRequest {
                bytes,
                file_name: format!("{public_id}.png"),
                public_id: Some(public_id),
                folder: None,
            })
            .await
            .inspect_err(|err| tracing::error!(error = %err, "selfie upload failed"))?;

        tracing::info!(public_id = %asset.public_id, "selfie uploaded");
        self.session.set_selfie_url(asset.secure_url.clone());
        Ok(asset.secure_url)
    }

    // Discards the preview and every reference derived from the old selfie.
    pub fn retake(&mut self) {
        self.preview = None;
        self.session.invalidate_selfie();
    }
}
