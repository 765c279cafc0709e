use bson::DateTime;
use serde::{Deserialize, Serialize};

/// A raw diarized transcript, written once per delivered topic message.
///
/// `id` is a freshly generated uuid per insert; `call_id` is the
/// correlation key generated upstream by the ingestion coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub call_id: String,
    pub transcript: String,
    pub created_at: DateTime,
}

impl TranscriptRecord {
    pub const COLLECTION: &'static str = "transcripts";
}
