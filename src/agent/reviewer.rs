//! The review agent and its three operations

use std::sync::Arc;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::OnceCell;
use crate::inference::{ChatRequest, InferenceEngine, DEFAULT_MODEL};
use crate::review::{now_millis, HistoryEntry, ReviewRecord, ReviewRequest};
use crate::storage::{schema, Param, StorageEngine};
use crate::{Error, Result};
use super::prompt;

/// Most records returned by a history listing
pub const HISTORY_LIMIT: i64 = 10;

/// Most past reviews fed into suggestion synthesis
pub const SUGGESTION_SOURCE_LIMIT: i64 = 5;

#[derive(Deserialize)]
struct FeedbackRow {
    feedback: String,
}

/// Stateful agent owning the review history
///
/// The schema is created once, before any operation touches the store.
/// Concurrent callers arriving during creation wait for it; a failed
/// attempt is retried by the next caller.
pub struct ReviewAgent {
    name: String,
    inference: Arc<dyn InferenceEngine>,
    storage: Arc<dyn StorageEngine>,
    model: String,
    schema_ready: OnceCell<()>,
}

impl ReviewAgent {
    pub fn new(
        name: impl Into<String>,
        inference: Arc<dyn InferenceEngine>,
        storage: Arc<dyn StorageEngine>,
    ) -> Self {
        Self {
            name: name.into(),
            inference,
            storage,
            model: DEFAULT_MODEL.to_string(),
            schema_ready: OnceCell::new(),
        }
    }

    /// Use `model` for every inference call
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ensure the review table exists. Runs the schema statements at most once.
    pub async fn ready(&self) -> Result<()> {
        self.schema_ready
            .get_or_try_init(|| async {
                for stmt in schema::all_schema_statements() {
                    self.storage.execute(stmt, Vec::new()).await?;
                }
                tracing::info!("Agent '{}' ready", self.name);
                Ok::<(), Error>(())
            })
            .await?;
        Ok(())
    }

    /// Review `request.code`, persist the result and return the stored record.
    ///
    /// Inference failures never fail this call; the feedback then holds a
    /// serialized error object. Storage failures do.
    pub async fn submit_review(&self, request: ReviewRequest) -> Result<ReviewRecord> {
        self.ready().await?;

        let ReviewRequest { code, language, context } = request;
        tracing::debug!(
            "Reviewing {} bytes of {} (context: {})",
            code.len(),
            language,
            context.is_some()
        );

        let prompt = prompt::review_prompt(&code, &language, context.as_deref());
        let feedback = self.infer(prompt).await;

        let mut record = ReviewRecord::new(code, language, feedback, now_millis());
        let params: Vec<Param> = vec![
            record.code.as_str().into(),
            record.language.as_str().into(),
            record.feedback.as_str().into(),
            record.timestamp.into(),
        ];

        let rows = self.storage.execute(schema::INSERT_REVIEW, params).await?.into_rows();
        match rows.first().and_then(|row| row.get("id")).and_then(Value::as_i64) {
            Some(id) => record.id = id,
            None => tracing::debug!("Store did not report an id for the new review"),
        }

        tracing::info!("Stored review #{} ({})", record.id, record.language);
        Ok(record)
    }

    /// The most recent reviews, newest first. Storage failures yield an empty list.
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.read(schema::SELECT_HISTORY, vec![HISTORY_LIMIT.into()]).await
    }

    /// Synthesize recurring anti-patterns from past reviews whose code contains `pattern`.
    ///
    /// Returns `None` without calling inference when nothing matches.
    pub async fn suggestions(&self, pattern: &str) -> Option<String> {
        let matches: Vec<FeedbackRow> = self
            .read(
                schema::SELECT_FEEDBACK_MATCHING,
                vec![pattern.into(), SUGGESTION_SOURCE_LIMIT.into()],
            )
            .await;

        if matches.is_empty() {
            tracing::debug!("No past reviews contain {:?}", pattern);
            return None;
        }

        let corpus = matches
            .iter()
            .map(|row| row.feedback.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        tracing::debug!("Synthesizing suggestions from {} reviews", matches.len());
        Some(self.infer(prompt::suggestion_prompt(&corpus)).await)
    }

    /// One inference call, normalized to text. Failures become a serialized error object.
    async fn infer(&self, prompt: String) -> String {
        match self.inference.run(&self.model, &ChatRequest::user(prompt)).await {
            Ok(reply) => reply.into_text(),
            Err(e) => {
                tracing::warn!("Inference with {} failed: {}", self.model, e);
                serde_json::json!({ "error": e.to_string() }).to_string()
            }
        }
    }

    /// Read path: any failure is logged and treated as no rows.
    async fn read<T: DeserializeOwned>(&self, statement: &str, params: Vec<Param>) -> Vec<T> {
        if let Err(e) = self.ready().await {
            tracing::warn!("Agent '{}' not ready: {}", self.name, e);
            return Vec::new();
        }

        match self.storage.execute(statement, params).await {
            Ok(outcome) => outcome.decode(),
            Err(e) => {
                tracing::warn!("Read failed on agent '{}': {}", self.name, e);
                Vec::new()
            }
        }
    }
}
