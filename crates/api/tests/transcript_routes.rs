use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use callgrade_api::{build_router, state::AppState};
use callgrade_pipeline::{IngestionCoordinator, TextPlayback, TopicBus, TopicPublisher};
use callgrade_services::store::{
    MemoryTranscriptStore, StoreError, StoreResult, TranscriptProjection, TranscriptStore,
};

fn test_state(transcripts: Arc<dyn TranscriptStore>) -> AppState {
    let bus = Arc::new(TopicBus::new("transcripts"));
    let coordinator = Arc::new(IngestionCoordinator::new(
        Arc::new(TextPlayback::new()),
        bus as Arc<dyn TopicPublisher>,
        Duration::from_secs(5),
    ));
    AppState {
        transcripts,
        coordinator,
    }
}

/// Store stub simulating an unreachable backend.
struct UnreachableStore;

#[async_trait]
impl TranscriptStore for UnreachableStore {
    async fn insert(&self, _call_id: &str, _transcript: &str) -> StoreResult<String> {
        Err(StoreError::Unavailable("connection refused to db host".to_string()))
    }

    async fn list(&self) -> StoreResult<Vec<TranscriptProjection>> {
        Err(StoreError::Unavailable("connection refused to db host".to_string()))
    }
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn empty_store_returns_empty_array() {
    let router = build_router(test_state(Arc::new(MemoryTranscriptStore::new())));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/transcript")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn stored_transcripts_are_projected() {
    let store = Arc::new(MemoryTranscriptStore::new());
    store.insert("call-1", "Speaker 1: hi").await.unwrap();

    let router = build_router(test_state(store));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/transcript")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["call_id"], "call-1");
    assert_eq!(items[0]["transcript"], "Speaker 1: hi");
    assert!(items[0]["id"].is_string());
}

#[tokio::test]
async fn unreachable_store_returns_500_without_internal_detail() {
    let router = build_router(test_state(Arc::new(UnreachableStore)));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/transcript")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert!(body.contains("Error fetching transcripts"));
    // No internal fault detail leaks to the caller.
    assert!(!body.contains("connection refused"));
}

#[tokio::test]
async fn empty_audio_body_is_a_bad_request() {
    let router = build_router(test_state(Arc::new(MemoryTranscriptStore::new())));

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/call/demo.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ingest_returns_the_generated_call_id() {
    let router = build_router(test_state(Arc::new(MemoryTranscriptStore::new())));

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/call/demo.txt")
                .body(Body::from("1\tHello, how can I help?\n2\tMy order is late."))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(!body["call_id"].as_str().unwrap().is_empty());
    assert_eq!(body["lines"], 2);
}
