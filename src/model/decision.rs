use serde_json::Value;
use thiserror::Error;

/// Structured choice returned by an LLM player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: String,
    pub target: String,
    pub reasoning: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionAction {
    Attack,
    Heal,
}

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("no JSON object found in LLM output")]
    NoJsonObject,
    #[error("invalid LLM output: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("decision must be a JSON object")]
    NotAnObject,
    #[error("decision is missing field `{0}`")]
    MissingField(&'static str),
    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

impl Decision {
    pub fn action_kind(&self) -> Result<DecisionAction, DecisionError> {
        let action = self.action.trim();
        if action.eq_ignore_ascii_case("attack") {
            Ok(DecisionAction::Attack)
        } else if action.eq_ignore_ascii_case("heal") {
            Ok(DecisionAction::Heal)
        } else {
            Err(DecisionError::UnknownAction(self.action.clone()))
        }
    }
}

/// Decode raw LLM text into a Decision.
/// Tolerates a Markdown fence or prose around the JSON object.
pub fn decode_decision(raw: &str) -> Result<Decision, DecisionError> {
    let json = extract_object(raw).ok_or(DecisionError::NoJsonObject)?;
    let value: Value = serde_json::from_str(json)?;

    let Value::Object(fields) = value else {
        return Err(DecisionError::NotAnObject);
    };

    let action = required_text(&fields, "action")?;
    let target = required_text(&fields, "target")?;
    let reasoning = fields
        .get("reasoning")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Decision {
        action,
        target,
        reasoning,
    })
}

fn required_text(
    fields: &serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<String, DecisionError> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(DecisionError::MissingField(key))
}

fn extract_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}
