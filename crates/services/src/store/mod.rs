pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::{MemoryAssessmentStore, MemoryTranscriptStore};
pub use mongo::{MongoAssessmentStore, MongoTranscriptStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("BSON serialization error: {0}")]
    BsonSer(#[from] bson::ser::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read-path projection of a stored transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptProjection {
    #[serde(rename = "_id")]
    pub id: String,
    pub call_id: String,
    pub transcript: String,
}

/// One evaluator verdict to persist for a (call, dimension) delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssessment {
    pub call_id: String,
    pub dimension: String,
    pub score: i64,
    pub summary: String,
    pub reasoning: String,
}

/// Durable store for raw transcripts: insert under a fresh id,
/// project-and-query for the read path.
#[async_trait]
pub trait TranscriptStore: Send + Sync + 'static {
    /// Inserts a transcript under a freshly generated id and returns it.
    async fn insert(&self, call_id: &str, transcript: &str) -> StoreResult<String>;

    /// Returns every stored transcript projected to (id, call_id, transcript).
    async fn list(&self) -> StoreResult<Vec<TranscriptProjection>>;
}

/// Durable store for per-dimension assessments. Insert-only: each call
/// generates a fresh id, so redelivery yields duplicate records rather
/// than an upsert on the (call_id, dimension) natural key.
#[async_trait]
pub trait AssessmentStore: Send + Sync + 'static {
    async fn insert(&self, assessment: NewAssessment) -> StoreResult<String>;
}
