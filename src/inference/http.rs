//! Remote inference over HTTP
//!
//! Posts `{"messages": [...]}` to an endpoint URL in which `{model}` is
//! replaced by the model identifier. Hosted inference REST APIs usually wrap
//! the model output as `{"result": ..., "success": true}`; that envelope is
//! removed before the reply is normalized.

use async_trait::async_trait;
use serde_json::Value;
use crate::config::{InferenceConfig, DEFAULT_TOKEN_ENV};
use crate::{Error, Result};
use super::{ChatRequest, InferenceEngine, InferenceReply};

/// Longest error body echoed back in an `Error::Inference`
const MAX_ERROR_BODY: usize = 512;

/// `InferenceEngine` backed by a remote HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpInference {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpInference {
    /// Create a client for `endpoint` (may contain a `{model}` placeholder)
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Send `token` as a bearer credential on every call
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build from configuration, reading the token from the configured environment variable
    pub fn from_config(config: &InferenceConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::Config("no inference endpoint configured".to_string()))?;

        let mut engine = Self::new(endpoint);
        let token_env = config.token_env.as_deref().unwrap_or(DEFAULT_TOKEN_ENV);
        match std::env::var(token_env) {
            Ok(token) if !token.is_empty() => engine = engine.with_token(token),
            _ => tracing::debug!("{} not set, calling inference endpoint without a token", token_env),
        }
        Ok(engine)
    }

    /// Endpoint URL for a given model
    pub fn url_for(&self, model: &str) -> String {
        self.endpoint.replace("{model}", model)
    }
}

#[async_trait]
impl InferenceEngine for HttpInference {
    async fn run(&self, model: &str, request: &ChatRequest) -> Result<InferenceReply> {
        let url = self.url_for(model);
        tracing::debug!("POST {} ({} messages)", url, request.messages.len());

        let mut call = self.client.post(&url).json(request);
        if let Some(token) = &self.token {
            call = call.bearer_auth(token);
        }

        let response = call.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(Error::Inference(format!("{} returned {}: {}", url, status, snippet)));
        }

        Ok(parse_body(&body))
    }
}

/// Turn a response body into a reply, removing the `result` envelope if present
fn parse_body(body: &str) -> InferenceReply {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => InferenceReply::from(unwrap_envelope(value)),
        Err(_) => InferenceReply::Text(body.to_string()),
    }
}

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("result") && map.contains_key("success") => {
            map.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}
