use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::TranscriptMessage;
use crate::broker::TopicPublisher;
use crate::completion::Completion;
use crate::session::{
    AudioInput, CancelReason, Cancellation, SessionObserver, SpeechSource, Utterance,
};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("speech session failed: {0}")]
    Session(#[source] anyhow::Error),
    #[error("transcript publish failed: {0}")]
    Publish(#[source] anyhow::Error),
}

/// Outcome of one ingested call.
#[derive(Debug, Clone)]
pub struct IngestedCall {
    pub call_id: String,
    pub line_count: usize,
}

/// Drains one diarized recognition session into an ordered transcript
/// and publishes it, exactly once, to the transcript topic.
///
/// The coordinator is single-threaded from the caller's perspective:
/// start the session, block on the single-shot completion signal
/// (set by whichever terminal event fires first), tear the session
/// down, publish.
pub struct IngestionCoordinator {
    speech: Arc<dyn SpeechSource>,
    publisher: Arc<dyn TopicPublisher>,
    session_timeout: Duration,
}

/// Observer registered for the session: accumulates labeled lines and
/// resolves the completion signal from either terminal sink.
struct TranscriptCollector {
    lines: Mutex<Vec<String>>,
    completion: Completion,
}

impl TranscriptCollector {
    fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            completion: Completion::new(),
        }
    }

    fn transcript(&self) -> (String, usize) {
        let lines = self.lines.lock();
        (lines.join("\n"), lines.len())
    }
}

impl SessionObserver for TranscriptCollector {
    fn on_utterance(&self, utterance: Utterance) {
        if utterance.text.is_empty() {
            return;
        }
        let label = match utterance.speaker_id {
            Some(id) => format!("Speaker {id}"),
            None => "Unknown".to_string(),
        };
        self.lines.lock().push(format!("{label}: {}", utterance.text));
    }

    fn on_canceled(&self, cancellation: Cancellation) {
        match cancellation.reason {
            CancelReason::Error => {
                // Errored cancellation does not abort assembly: the
                // lines accumulated so far are still emitted.
                error!(
                    detail = cancellation.detail.as_deref().unwrap_or("unknown"),
                    "Recognition canceled with error"
                );
            }
            CancelReason::EndOfStream => {
                warn!("Recognition canceled: end of stream");
            }
        }
        self.completion.set();
    }

    fn on_stopped(&self) {
        info!("Recognition session stopped");
        self.completion.set();
    }
}

impl IngestionCoordinator {
    pub fn new(
        speech: Arc<dyn SpeechSource>,
        publisher: Arc<dyn TopicPublisher>,
        session_timeout: Duration,
    ) -> Self {
        Self {
            speech,
            publisher,
            session_timeout,
        }
    }

    /// Runs one full ingestion: session → transcript → publish.
    ///
    /// A transcript is published even when no utterances were produced
    /// (empty string) and even after an errored cancellation; only
    /// transport failures against the collaborators are fatal.
    pub async fn ingest(&self, audio: AudioInput) -> Result<IngestedCall, IngestError> {
        info!(
            name = %audio.name,
            bytes = audio.bytes.len(),
            backend = %self.speech.name(),
            "Ingesting call audio"
        );

        let collector = Arc::new(TranscriptCollector::new());
        let completion = collector.completion.clone();

        let mut session = self
            .speech
            .open_session(audio, collector.clone() as Arc<dyn SessionObserver>)
            .await
            .map_err(IngestError::Session)?;

        session.start().await.map_err(IngestError::Session)?;

        if tokio::time::timeout(self.session_timeout, completion.wait())
            .await
            .is_err()
        {
            error!(
                timeout_secs = self.session_timeout.as_secs(),
                "No terminal session event within the bounded wait, proceeding with accumulated lines"
            );
        }

        session.stop().await.map_err(IngestError::Session)?;

        let (transcript, line_count) = collector.transcript();
        let call_id = Uuid::new_v4().to_string();

        let message = TranscriptMessage {
            call_id: call_id.clone(),
            transcript,
        };
        let payload =
            serde_json::to_vec(&message).map_err(|e| IngestError::Publish(e.into()))?;
        self.publisher
            .publish(payload)
            .await
            .map_err(IngestError::Publish)?;

        info!(%call_id, line_count, "Transcript published");

        Ok(IngestedCall {
            call_id,
            line_count,
        })
    }
}
