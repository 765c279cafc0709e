use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;

use callgrade_api::{build_router, state::AppState};
use callgrade_pipeline::{
    AssessmentHandler, IngestionCoordinator, SubscriptionWorker, TextPlayback, TopicBus,
    TopicPublisher, TranscriptPersister,
};
use callgrade_services::scorer::{Dimension, Scorer};
use callgrade_services::store::{
    AssessmentStore, MemoryAssessmentStore, MemoryTranscriptStore, TranscriptStore,
};

/// Scorer stub returning a conforming verdict for whichever dimension
/// the system instruction mandates.
pub struct CannedScorer;

#[async_trait]
impl Scorer for CannedScorer {
    async fn score(&self, system_prompt: &str, _user_prompt: &str) -> anyhow::Result<String> {
        let dimension = Dimension::all()
            .into_iter()
            .find(|d| system_prompt.contains(&format!("\"{}\"", d.score_key())))
            .expect("system prompt does not name a known dimension");
        Ok(format!(
            r#"{{"{}": 4, "summary": "short call", "reasoning": "handled well"}}"#,
            dimension.score_key()
        ))
    }

    fn name(&self) -> &str {
        "canned"
    }
}

/// Full application instance on an ephemeral port: in-memory stores,
/// canned scorer, text-playback speech backend, real bus and workers.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub bus: Arc<TopicBus>,
    pub transcripts: Arc<MemoryTranscriptStore>,
    pub assessments: Arc<MemoryAssessmentStore>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let transcripts = Arc::new(MemoryTranscriptStore::new());
        let assessments = Arc::new(MemoryAssessmentStore::new());

        let bus = Arc::new(TopicBus::new("transcripts"));
        let scorer: Arc<dyn Scorer> = Arc::new(CannedScorer);

        for dimension in Dimension::all() {
            let subscription = bus.subscribe(format!("{}_assessment", dimension.name()));
            let handler = Arc::new(AssessmentHandler::new(
                dimension,
                scorer.clone(),
                assessments.clone() as Arc<dyn AssessmentStore>,
            ));
            tokio::spawn(SubscriptionWorker::new(subscription, handler).run());
        }

        let persister = Arc::new(TranscriptPersister::new(
            transcripts.clone() as Arc<dyn TranscriptStore>,
        ));
        tokio::spawn(SubscriptionWorker::new(bus.subscribe("transcript_archive"), persister).run());

        let coordinator = Arc::new(IngestionCoordinator::new(
            Arc::new(TextPlayback::new()),
            bus.clone() as Arc<dyn TopicPublisher>,
            Duration::from_secs(5),
        ));

        let router = build_router(AppState {
            transcripts: transcripts.clone(),
            coordinator,
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            bus,
            transcripts,
            assessments,
        }
    }

    /// Re-fans a raw payload out to every subscription, simulating
    /// at-least-once redelivery by the broker.
    pub fn redeliver(&self, payload: &[u8]) {
        self.bus.fan_out(payload);
    }

    pub async fn ingest(&self, name: &str, body: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/api/call/{name}", self.base_url))
            .body(body.to_string())
            .send()
            .await
            .unwrap()
    }

    pub async fn get_transcripts(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/api/transcript", self.base_url))
            .send()
            .await
            .unwrap()
    }

    /// Polls `condition` until it holds or a 3 second deadline passes.
    pub async fn wait_until(&self, mut condition: impl FnMut() -> bool) {
        for _ in 0..300 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not met within 3s");
    }
}
