use std::sync::Arc;

use callgrade_pipeline::IngestionCoordinator;
use callgrade_services::store::TranscriptStore;

/// Shared application state.
///
/// Collaborator clients are constructed once at startup and live for
/// the process lifetime; handlers only ever clone `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub transcripts: Arc<dyn TranscriptStore>,
    pub coordinator: Arc<IngestionCoordinator>,
}
