use std::sync::Arc;

use async_trait::async_trait;

/// An audio object that triggers ingestion, identified by name.
#[derive(Debug, Clone)]
pub struct AudioInput {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A recognized utterance, pushed in session order (never reordered).
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Diarized speaker identity, when one was assigned.
    pub speaker_id: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    EndOfStream,
    Error,
}

/// Terminal cancellation event, carrying detail when the reason is an
/// error condition.
#[derive(Debug, Clone)]
pub struct Cancellation {
    pub reason: CancelReason,
    pub detail: Option<String>,
}

/// Event sinks registered once per recognition session.
///
/// Callbacks may fire from any task; the two terminal sinks
/// (`on_canceled`, `on_stopped`) may even fire concurrently with each
/// other, so implementations must be race-safe.
pub trait SessionObserver: Send + Sync + 'static {
    fn on_utterance(&self, utterance: Utterance);
    fn on_canceled(&self, cancellation: Cancellation);
    fn on_stopped(&self);
}

/// Handle to an open recognition session.
#[async_trait]
pub trait SpeechSession: Send {
    /// Begins event delivery to the registered observer.
    async fn start(&mut self) -> anyhow::Result<()>;

    /// Requests session teardown. Called after a terminal event has
    /// been observed (or the bounded wait elapsed).
    async fn stop(&mut self) -> anyhow::Result<()>;
}

/// Speech-recognition collaborator: opens diarized recognition
/// sessions over call audio. Transport failures from `open_session`,
/// `start` or `stop` are fatal for the current call.
#[async_trait]
pub trait SpeechSource: Send + Sync + 'static {
    async fn open_session(
        &self,
        audio: AudioInput,
        observer: Arc<dyn SessionObserver>,
    ) -> anyhow::Result<Box<dyn SpeechSession>>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
