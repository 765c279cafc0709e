use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{
    AssessmentStore, NewAssessment, StoreResult, TranscriptProjection, TranscriptStore,
};

/// In-memory transcript store. Used by the test harness and as a
/// storage backend for local development without a MongoDB instance.
#[derive(Default)]
pub struct MemoryTranscriptStore {
    records: RwLock<Vec<TranscriptProjection>>,
}

impl MemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<TranscriptProjection> {
        self.records.read().clone()
    }
}

#[async_trait]
impl TranscriptStore for MemoryTranscriptStore {
    async fn insert(&self, call_id: &str, transcript: &str) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        self.records.write().push(TranscriptProjection {
            id: id.clone(),
            call_id: call_id.to_string(),
            transcript: transcript.to_string(),
        });
        Ok(id)
    }

    async fn list(&self) -> StoreResult<Vec<TranscriptProjection>> {
        Ok(self.records.read().clone())
    }
}

/// A stored assessment row, exposed for test inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAssessment {
    pub id: String,
    pub assessment: NewAssessment,
}

#[derive(Default)]
pub struct MemoryAssessmentStore {
    records: RwLock<Vec<StoredAssessment>>,
}

impl MemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<StoredAssessment> {
        self.records.read().clone()
    }
}

#[async_trait]
impl AssessmentStore for MemoryAssessmentStore {
    async fn insert(&self, assessment: NewAssessment) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        self.records.write().push(StoredAssessment {
            id: id.clone(),
            assessment,
        });
        Ok(id)
    }
}
