use async_trait::async_trait;
use bson::{DateTime, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use uuid::Uuid;

use callgrade_db::models::{AssessmentRecord, TranscriptRecord};

use super::{
    AssessmentStore, NewAssessment, StoreResult, TranscriptProjection, TranscriptStore,
};

pub struct MongoTranscriptStore {
    records: Collection<TranscriptRecord>,
    projections: Collection<TranscriptProjection>,
}

impl MongoTranscriptStore {
    pub fn new(db: &Database) -> Self {
        Self {
            records: db.collection(TranscriptRecord::COLLECTION),
            projections: db.collection(TranscriptRecord::COLLECTION),
        }
    }
}

#[async_trait]
impl TranscriptStore for MongoTranscriptStore {
    async fn insert(&self, call_id: &str, transcript: &str) -> StoreResult<String> {
        let record = TranscriptRecord {
            id: Uuid::new_v4().to_string(),
            call_id: call_id.to_string(),
            transcript: transcript.to_string(),
            created_at: DateTime::now(),
        };
        self.records.insert_one(&record).await?;
        Ok(record.id)
    }

    async fn list(&self) -> StoreResult<Vec<TranscriptProjection>> {
        let cursor = self
            .projections
            .find(doc! {})
            .projection(doc! { "_id": 1, "call_id": 1, "transcript": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

pub struct MongoAssessmentStore {
    records: Collection<AssessmentRecord>,
}

impl MongoAssessmentStore {
    pub fn new(db: &Database) -> Self {
        Self {
            records: db.collection(AssessmentRecord::COLLECTION),
        }
    }
}

#[async_trait]
impl AssessmentStore for MongoAssessmentStore {
    async fn insert(&self, assessment: NewAssessment) -> StoreResult<String> {
        let mut verdict = bson::Document::new();
        verdict.insert(format!("{}_score", assessment.dimension), assessment.score);
        verdict.insert("summary", assessment.summary);
        verdict.insert("reasoning", assessment.reasoning);

        let record = AssessmentRecord {
            id: Uuid::new_v4().to_string(),
            call_id: assessment.call_id,
            assessment: verdict,
            dimension: assessment.dimension,
            created_at: DateTime::now(),
        };
        self.records.insert_one(&record).await?;
        Ok(record.id)
    }
}
