use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use callgrade_api::{build_router, state::AppState};
use callgrade_config::Settings;
use callgrade_pipeline::{
    AssessmentHandler, IngestionCoordinator, SpeechSource, SubscriptionWorker, TextPlayback,
    TopicBus, TopicPublisher, TranscriptPersister,
};
use callgrade_services::scorer::{Dimension, OpenAiScorer, Scorer};
use callgrade_services::store::{
    AssessmentStore, MemoryAssessmentStore, MemoryTranscriptStore, MongoAssessmentStore,
    MongoTranscriptStore, TranscriptStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("Failed to load settings")?;

    // Durable stores, constructed once for the process lifetime.
    let (transcripts, assessments): (Arc<dyn TranscriptStore>, Arc<dyn AssessmentStore>) =
        match settings.store.backend.as_str() {
            "memory" => {
                info!("Using in-memory store backend");
                (
                    Arc::new(MemoryTranscriptStore::new()),
                    Arc::new(MemoryAssessmentStore::new()),
                )
            }
            _ => {
                let client = mongodb::Client::with_uri_str(&settings.mongo.uri)
                    .await
                    .context("Failed to connect to MongoDB")?;
                let db = client.database(&settings.mongo.database);
                callgrade_db::ensure_indexes(&db)
                    .await
                    .context("Failed to ensure indexes")?;
                (
                    Arc::new(MongoTranscriptStore::new(&db)),
                    Arc::new(MongoAssessmentStore::new(&db)),
                )
            }
        };

    let scorer: Arc<dyn Scorer> = Arc::new(OpenAiScorer::new(settings.scorer.clone()));

    let speech: Arc<dyn SpeechSource> = match settings.speech.backend.as_str() {
        "text_playback" => Arc::new(TextPlayback::new()),
        other => anyhow::bail!("Unknown speech backend '{other}'"),
    };

    // One topic, one durable subscription per consumer, all set up
    // before the first publish.
    let bus = Arc::new(TopicBus::new(settings.pipeline.topic.clone()));

    for dimension in Dimension::all() {
        let subscription = bus.subscribe(format!("{}_assessment", dimension.name()));
        let handler = Arc::new(AssessmentHandler::new(
            dimension,
            scorer.clone(),
            assessments.clone(),
        ));
        tokio::spawn(SubscriptionWorker::new(subscription, handler).run());
    }

    let subscription = bus.subscribe("transcript_archive");
    let persister = Arc::new(TranscriptPersister::new(transcripts.clone()));
    tokio::spawn(SubscriptionWorker::new(subscription, persister).run());

    let coordinator = Arc::new(IngestionCoordinator::new(
        speech,
        bus.clone() as Arc<dyn TopicPublisher>,
        Duration::from_secs(settings.pipeline.session_timeout_secs),
    ));

    let router = build_router(AppState {
        transcripts,
        coordinator,
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "callgrade API listening");

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
