use std::collections::HashSet;
use std::time::Duration;

use serde_json::Value;

use crate::fixtures::test_app::TestApp;

#[tokio::test]
async fn ingested_call_fans_out_to_every_consumer() {
    let app = TestApp::spawn().await;

    let resp = app
        .ingest(
            "support-call.txt",
            "1\tHello, how can I help you today?\n2\tMy order never arrived.\n1\tI'm sorry to hear that, let me check.",
        )
        .await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    let call_id = body["call_id"].as_str().unwrap().to_string();
    assert_eq!(body["lines"], 3);

    // One transcript record and one assessment per dimension, all
    // carrying the same correlation id.
    app.wait_until(|| app.transcripts.all().len() == 1).await;
    app.wait_until(|| app.assessments.all().len() == 3).await;

    let transcripts = app.transcripts.all();
    assert_eq!(transcripts[0].call_id, call_id);
    assert_eq!(
        transcripts[0].transcript,
        "Speaker 1: Hello, how can I help you today?\n\
         Speaker 2: My order never arrived.\n\
         Speaker 1: I'm sorry to hear that, let me check."
    );

    let assessments = app.assessments.all();
    let dimensions: HashSet<&str> = assessments
        .iter()
        .map(|a| a.assessment.dimension.as_str())
        .collect();
    assert_eq!(
        dimensions,
        HashSet::from(["politeness", "empathy", "professionalism"])
    );
    for stored in &assessments {
        assert_eq!(stored.assessment.call_id, call_id);
        assert_eq!(stored.assessment.score, 4);
        assert_eq!(stored.assessment.summary, "short call");
    }
}

#[tokio::test]
async fn zero_utterance_call_returns_a_call_id_but_persists_nothing() {
    let app = TestApp::spawn().await;

    // Whitespace-only audio produces no utterances; the coordinator
    // still publishes, and every consumer drops the empty transcript.
    let resp = app.ingest("silence.txt", "   \n\n  ").await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(!body["call_id"].as_str().unwrap().is_empty());
    assert_eq!(body["lines"], 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(app.transcripts.all().is_empty());
    assert!(app.assessments.all().is_empty());
}

#[tokio::test]
async fn each_ingestion_generates_a_fresh_call_id() {
    let app = TestApp::spawn().await;

    let first: Value = app.ingest("a.txt", "1\thi").await.json().await.unwrap();
    let second: Value = app.ingest("b.txt", "1\thi").await.json().await.unwrap();

    assert_ne!(first["call_id"], second["call_id"]);
}

#[tokio::test]
async fn health_check_is_live() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(format!("{}/health", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}
