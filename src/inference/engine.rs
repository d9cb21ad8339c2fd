use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::Result;
use super::InferenceReply;

/// Model used when no other is configured
pub const DEFAULT_MODEL: &str = "@cf/meta/llama-3.1-8b-instruct";

/// One chat turn sent to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for a single inference call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// A request carrying exactly one user-role message
    pub fn user(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
        }
    }
}

/// Trait for hosted inference backends
///
/// Implementations may be slow and may fail; callers are expected to
/// degrade rather than propagate failures to end users.
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Run `model` on `request` and return whatever shape the engine replied with
    async fn run(&self, model: &str, request: &ChatRequest) -> Result<InferenceReply>;
}

/// Engine for read-only callers that never reach the model
///
/// Every call fails with a config error, which the agent turns into
/// degraded feedback like any other inference failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

#[async_trait]
impl InferenceEngine for Unconfigured {
    async fn run(&self, model: &str, _request: &ChatRequest) -> Result<InferenceReply> {
        Err(crate::Error::Config(format!("no inference endpoint configured for {}", model)))
    }
}
