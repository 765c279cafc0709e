use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::error;

use callgrade_pipeline::AudioInput;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub call_id: String,
    pub lines: usize,
}

/// Ingestion trigger: a new audio object arrives as the raw request
/// body, identified by `name`. Runs the full coordinator flow and
/// returns the generated correlation id.
pub async fn ingest(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<IngestResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Empty audio body".to_string()));
    }

    let ingested = state
        .coordinator
        .ingest(AudioInput {
            name,
            bytes: body.to_vec(),
        })
        .await
        .map_err(|e| {
            error!(%e, "Ingestion failed");
            ApiError::Internal("Error ingesting call audio".to_string())
        })?;

    Ok(Json(IngestResponse {
        call_id: ingested.call_id,
        lines: ingested.line_count,
    }))
}
