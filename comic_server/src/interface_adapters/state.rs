use std::sync::Arc;

use crate::domain::ports::AssetStorage;
use crate::use_cases::{DialogueGenerator, GenerationOrchestrator};

#[derive(Clone)]
pub struct AppState {
    // Collaborators sit behind Arc<dyn Trait> so tests can swap in fakes.
    pub orchestrator: GenerationOrchestrator,
    pub dialogue: DialogueGenerator,
    pub storage: Arc<dyn AssetStorage>,
    // Folder used when an upload request does not name one.
    pub default_upload_folder: Option<String>,
}
