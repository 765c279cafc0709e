use axum::{Json, extract::State};
use serde::Serialize;
use tracing::error;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub id: String,
    pub call_id: String,
    pub transcript: String,
}

/// Returns every stored transcript, projected to (id, call_id,
/// transcript). No pagination or filtering; an empty store yields an
/// empty array. Store faults surface as a generic 500 with no internal
/// detail.
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<TranscriptResponse>>, ApiError> {
    let records = state.transcripts.list().await.map_err(|e| {
        error!(%e, "Failed to fetch transcripts");
        ApiError::Internal("Error fetching transcripts".to_string())
    })?;

    let response = records
        .into_iter()
        .map(|r| TranscriptResponse {
            id: r.id,
            call_id: r.call_id,
            transcript: r.transcript,
        })
        .collect();

    Ok(Json(response))
}
