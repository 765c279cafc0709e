pub mod dimension;
pub mod openai;
pub mod verdict;

pub use dimension::Dimension;
pub use openai::OpenAiScorer;
pub use verdict::{ContractError, Verdict};

use async_trait::async_trait;

/// Generative text evaluator: one instruction pair in, raw text out.
///
/// Implementations are constructed once at startup and shared for the
/// process lifetime.
#[async_trait]
pub trait Scorer: Send + Sync + 'static {
    /// Sends a system/user instruction pair and returns the raw
    /// response text, trimmed.
    async fn score(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
