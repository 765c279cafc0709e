use serde_json::Value;

use crate::fixtures::test_app::TestApp;

#[tokio::test]
async fn empty_store_lists_an_empty_array() {
    let app = TestApp::spawn().await;

    let resp = app.get_transcripts().await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn listed_transcripts_carry_id_call_id_and_text() {
    let app = TestApp::spawn().await;

    app.ingest("one.txt", "1\tHello").await;
    app.wait_until(|| app.transcripts.all().len() == 1).await;

    let resp = app.get_transcripts().await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0]["id"].is_string());
    assert!(items[0]["call_id"].is_string());
    assert_eq!(items[0]["transcript"], "Speaker 1: Hello");
}

#[tokio::test]
async fn redelivered_messages_leave_duplicate_transcript_rows() {
    let app = TestApp::spawn().await;

    app.ingest("dup.txt", "1\tHello").await;
    app.wait_until(|| app.transcripts.all().len() == 1).await;
    let call_id = app.transcripts.all()[0].call_id.clone();

    // Simulate at-least-once redelivery of the same payload.
    let payload = serde_json::to_vec(&callgrade_pipeline::TranscriptMessage {
        call_id: call_id.clone(),
        transcript: "Speaker 1: Hello".to_string(),
    })
    .unwrap();
    app.redeliver(&payload);

    app.wait_until(|| app.transcripts.all().len() == 2).await;
    let rows = app.transcripts.all();
    assert_eq!(rows[0].call_id, rows[1].call_id);
    assert_ne!(rows[0].id, rows[1].id);
}
