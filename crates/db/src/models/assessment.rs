use bson::{DateTime, Document};
use serde::{Deserialize, Serialize};

/// One behavioral assessment of a call along a single dimension.
///
/// `assessment` holds the evaluator's verdict in its wire shape:
/// `{"<dimension>_score": <1..5>, "summary": ..., "reasoning": ...}`.
/// Ids are freshly generated per insert, so redelivered messages
/// produce additional records for the same (call_id, dimension).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub call_id: String,
    pub assessment: Document,
    #[serde(rename = "type")]
    pub dimension: String,
    pub created_at: DateTime,
}

impl AssessmentRecord {
    pub const COLLECTION: &'static str = "assessments";
}
