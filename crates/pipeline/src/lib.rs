pub mod broker;
pub mod completion;
pub mod coordinator;
pub mod playback;
pub mod session;
pub mod worker;

pub use broker::{Subscription, TopicBus, TopicPublisher};
pub use completion::Completion;
pub use coordinator::{IngestError, IngestedCall, IngestionCoordinator};
pub use playback::TextPlayback;
pub use session::{
    AudioInput, CancelReason, Cancellation, SessionObserver, SpeechSession, SpeechSource,
    Utterance,
};
pub use worker::{AssessmentHandler, MessageHandler, SubscriptionWorker, TranscriptPersister};

use serde::{Deserialize, Serialize};

/// The message published once per ingested call and fanned out to
/// every subscription on the transcript topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub call_id: String,
    pub transcript: String,
}
