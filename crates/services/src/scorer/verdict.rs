use thiserror::Error;

use super::Dimension;

/// Violations of the mandated evaluator response contract.
///
/// Any of these drops the message: no retry, no fallback score.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response is not a JSON object")]
    NotAnObject,
    #[error("missing key `{0}`")]
    MissingKey(String),
    #[error("`{0}` is not an integer")]
    NonIntegerScore(String),
    #[error("score {0} is outside 1..=5")]
    ScoreOutOfRange(i64),
    #[error("`{0}` is not a string")]
    NonStringField(&'static str),
}

/// A parsed, validated evaluator verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub score: i64,
    pub summary: String,
    pub reasoning: String,
}

impl Verdict {
    /// Enforces the strict-JSON response contract for `dimension`.
    ///
    /// The raw text must be exactly one JSON object carrying an integer
    /// `<dimension>_score` in [1,5] plus string `summary` and
    /// `reasoning`. Markdown fencing, surrounding prose, or trailing
    /// characters all fail the initial parse.
    pub fn parse(dimension: &Dimension, raw: &str) -> Result<Verdict, ContractError> {
        let value: serde_json::Value = serde_json::from_str(raw.trim())?;
        let object = value.as_object().ok_or(ContractError::NotAnObject)?;

        let score_key = dimension.score_key();
        let score = object
            .get(&score_key)
            .ok_or_else(|| ContractError::MissingKey(score_key.clone()))?
            .as_i64()
            .ok_or(ContractError::NonIntegerScore(score_key))?;
        if !(1..=5).contains(&score) {
            return Err(ContractError::ScoreOutOfRange(score));
        }

        let summary = string_field(object, "summary")?;
        let reasoning = string_field(object, "reasoning")?;

        Ok(Verdict {
            score,
            summary,
            reasoning,
        })
    }
}

fn string_field(
    object: &serde_json::Map<String, serde_json::Value>,
    key: &'static str,
) -> Result<String, ContractError> {
    object
        .get(key)
        .ok_or_else(|| ContractError::MissingKey(key.to_string()))?
        .as_str()
        .map(str::to_string)
        .ok_or(ContractError::NonStringField(key))
}
