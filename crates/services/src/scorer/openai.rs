use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use callgrade_config::ScorerSettings;

use super::Scorer;

// Fixed control parameters: the rubric text differs per dimension, the
// sampling does not.
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 1.0;

/// Evaluator backend over an OpenAI-compatible chat-completions API.
pub struct OpenAiScorer {
    settings: ScorerSettings,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

impl OpenAiScorer {
    pub fn new(settings: ScorerSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Scorer for OpenAiScorer {
    async fn score(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String> {
        let url = format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        );

        let request = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Evaluator request failed: {e}"))?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("Evaluator returned an error status: {e}"))?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Evaluator response was not decodable: {e}"))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("Evaluator returned no choices"))?;

        debug!(model = %self.settings.model, response_len = content.len(), "Evaluator responded");

        Ok(content.trim().to_string())
    }

    fn name(&self) -> &str {
        "openai"
    }
}
