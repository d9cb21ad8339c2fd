//! Normalization of inference replies
//!
//! Engines have been observed to reply with a bare string, with an object
//! carrying a `response` text field, or with something else entirely.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shapes an inference reply may take
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InferenceReply {
    /// Bare string reply
    Text(String),
    /// Object with a `response` text field (extra fields ignored)
    Structured { response: String },
    /// Anything else, kept verbatim
    Other(Value),
}

impl InferenceReply {
    /// Extract the reply text.
    ///
    /// Unknown shapes fall back to their compact JSON serialization, so this
    /// never fails. `null` becomes the string `"null"`.
    pub fn into_text(self) -> String {
        match self {
            InferenceReply::Text(text) => text,
            InferenceReply::Structured { response } => response,
            InferenceReply::Other(value) => value.to_string(),
        }
    }
}

impl From<Value> for InferenceReply {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => InferenceReply::Text(text),
            Value::Object(ref map) => match map.get("response") {
                Some(Value::String(response)) => InferenceReply::Structured {
                    response: response.clone(),
                },
                _ => InferenceReply::Other(value),
            },
            other => InferenceReply::Other(other),
        }
    }
}

impl From<&str> for InferenceReply {
    fn from(text: &str) -> Self {
        InferenceReply::Text(text.to_string())
    }
}
