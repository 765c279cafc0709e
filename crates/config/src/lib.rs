use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level application settings.
///
/// Loaded from `config/default.toml`, an optional per-environment file
/// selected by `CALLGRADE_ENV`, and finally `CALLGRADE_*` environment
/// variables (double underscore as section separator, e.g.
/// `CALLGRADE_MONGO__URI`).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub mongo: MongoSettings,
    pub speech: SpeechSettings,
    pub scorer: ScorerSettings,
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Durable store backend: "mongo" or "memory".
    pub backend: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: "mongo".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "callgrade".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Speech recognition backend: "text_playback" replays UTF-8 text
    /// objects as recognition events for local development and tests.
    pub backend: String,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            backend: "text_playback".to_string(),
        }
    }
}

/// Connection settings for the generative evaluator.
///
/// Sampling parameters are fixed in code; only the connection details
/// are configurable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScorerSettings {
    /// Base URL of an OpenAI-compatible chat-completions API.
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl Default for ScorerSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Topic name the coordinator publishes to.
    pub topic: String,
    /// Upper bound on the wait for a terminal session event. When it
    /// elapses the session is torn down and whatever lines were
    /// accumulated are still published.
    pub session_timeout_secs: u64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            topic: "transcripts".to_string(),
            session_timeout_secs: 600,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let run_env =
            std::env::var("CALLGRADE_ENV").unwrap_or_else(|_| "development".to_string());

        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_env}")).required(false))
            .add_source(Environment::with_prefix("CALLGRADE").separator("__"))
            .build()?
            .try_deserialize()
    }
}
