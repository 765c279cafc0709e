use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use callgrade_services::scorer::{ContractError, Dimension, Scorer, Verdict};
use callgrade_services::store::{AssessmentStore, NewAssessment, StoreError, TranscriptStore};

use crate::TranscriptMessage;
use crate::broker::Subscription;

/// A delivered payload that failed validation. Poison messages are
/// dropped and logged, never retried or dead-lettered.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing or empty `{0}`")]
    EmptyField(&'static str),
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("evaluator call failed: {0}")]
    Scorer(#[source] anyhow::Error),
    #[error("evaluator response violated the contract: {0}")]
    Contract(#[from] ContractError),
    #[error("store insert failed: {0}")]
    Store(#[from] StoreError),
}

/// Per-subscription message processor.
#[async_trait]
pub trait MessageHandler: Send + Sync + 'static {
    fn name(&self) -> &str;

    async fn handle(&self, message: TranscriptMessage) -> Result<(), WorkerError>;
}

/// Decodes and validates one delivered payload.
///
/// A message must be JSON carrying non-empty `call_id` and
/// `transcript`; consumers drop empty-transcript messages even though
/// the coordinator publishes them for zero-utterance sessions.
fn decode_message(payload: &[u8]) -> Result<TranscriptMessage, DecodeError> {
    let message: TranscriptMessage = serde_json::from_slice(payload)?;
    if message.call_id.is_empty() {
        return Err(DecodeError::EmptyField("call_id"));
    }
    if message.transcript.is_empty() {
        return Err(DecodeError::EmptyField("transcript"));
    }
    Ok(message)
}

/// Drives one subscription: receive, validate, dispatch, contain.
///
/// Every failure is contained to this subscription — a poison payload
/// or a handler error is logged and the loop moves to the next
/// delivery. Messages within a subscription carry no ordering
/// dependence on one another.
pub struct SubscriptionWorker<H: MessageHandler> {
    subscription: Subscription,
    handler: Arc<H>,
}

impl<H: MessageHandler> SubscriptionWorker<H> {
    pub fn new(subscription: Subscription, handler: Arc<H>) -> Self {
        Self {
            subscription,
            handler,
        }
    }

    /// Runs until the subscription's topic is gone.
    pub async fn run(mut self) {
        info!(
            subscription = %self.subscription.name(),
            handler = %self.handler.name(),
            "Worker started"
        );

        while let Some(payload) = self.subscription.recv().await {
            let message = match decode_message(&payload) {
                Ok(message) => message,
                Err(e) => {
                    warn!(
                        subscription = %self.subscription.name(),
                        %e,
                        "Dropping poison message"
                    );
                    continue;
                }
            };

            let call_id = message.call_id.clone();
            match self.handler.handle(message).await {
                Ok(()) => {}
                Err(WorkerError::Contract(e)) => {
                    warn!(
                        subscription = %self.subscription.name(),
                        %call_id,
                        %e,
                        "Dropping message: evaluator response rejected"
                    );
                }
                Err(e) => {
                    error!(
                        subscription = %self.subscription.name(),
                        %call_id,
                        %e,
                        "Message abandoned"
                    );
                }
            }
        }

        debug!(subscription = %self.subscription.name(), "Subscription closed, worker stopped");
    }
}

/// Scores one transcript along a single dimension and persists the
/// verdict. One instance (and one subscription) per dimension.
pub struct AssessmentHandler {
    dimension: Dimension,
    scorer: Arc<dyn Scorer>,
    store: Arc<dyn AssessmentStore>,
}

impl AssessmentHandler {
    pub fn new(
        dimension: Dimension,
        scorer: Arc<dyn Scorer>,
        store: Arc<dyn AssessmentStore>,
    ) -> Self {
        Self {
            dimension,
            scorer,
            store,
        }
    }
}

#[async_trait]
impl MessageHandler for AssessmentHandler {
    fn name(&self) -> &str {
        self.dimension.name()
    }

    async fn handle(&self, message: TranscriptMessage) -> Result<(), WorkerError> {
        let raw = self
            .scorer
            .score(
                &self.dimension.system_prompt(),
                &self.dimension.user_prompt(&message.transcript),
            )
            .await
            .map_err(WorkerError::Scorer)?;

        let verdict = Verdict::parse(&self.dimension, &raw)?;

        let id = self
            .store
            .insert(NewAssessment {
                call_id: message.call_id.clone(),
                dimension: self.dimension.name().to_string(),
                score: verdict.score,
                summary: verdict.summary,
                reasoning: verdict.reasoning,
            })
            .await?;

        info!(
            call_id = %message.call_id,
            dimension = %self.dimension.name(),
            score = verdict.score,
            %id,
            "Assessment persisted"
        );
        Ok(())
    }
}

/// Persists the raw transcript of every valid delivery.
pub struct TranscriptPersister {
    store: Arc<dyn TranscriptStore>,
}

impl TranscriptPersister {
    pub fn new(store: Arc<dyn TranscriptStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageHandler for TranscriptPersister {
    fn name(&self) -> &str {
        "transcript-persister"
    }

    async fn handle(&self, message: TranscriptMessage) -> Result<(), WorkerError> {
        let id = self
            .store
            .insert(&message.call_id, &message.transcript)
            .await?;
        info!(call_id = %message.call_id, %id, "Transcript persisted");
        Ok(())
    }
}
