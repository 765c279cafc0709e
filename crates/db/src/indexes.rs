use mongodb::{Database, IndexModel};
use tracing::info;

use crate::models::{AssessmentRecord, TranscriptRecord};

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Transcripts
    create_indexes(
        db,
        TranscriptRecord::COLLECTION,
        vec![index(bson::doc! { "call_id": 1 })],
    )
    .await?;

    // Assessments. The (call_id, type) index is NOT unique: persistence
    // is insert-only under fresh ids, so at-least-once redelivery leaves
    // duplicate rows for the same natural key.
    create_indexes(
        db,
        AssessmentRecord::COLLECTION,
        vec![
            index(bson::doc! { "call_id": 1 }),
            index(bson::doc! { "call_id": 1, "type": 1 }),
        ],
    )
    .await?;

    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    info!(collection, "Indexes created");
    Ok(())
}
