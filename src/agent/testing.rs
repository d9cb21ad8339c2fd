//! Test doubles for the inference and storage engines

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;
use crate::inference::{ChatRequest, InferenceEngine, InferenceReply};
use crate::storage::{Param, QueryOutcome, SqliteStore, StorageEngine};
use crate::{Error, Result};
use super::ReviewAgent;

/// Inference engine that returns a canned reply (or fails) and records prompts
pub struct StubInference {
    reply: Option<InferenceReply>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubInference {
    pub fn replying(reply: impl Into<InferenceReply>) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl InferenceEngine for StubInference {
    async fn run(&self, _model: &str, request: &ChatRequest) -> Result<InferenceReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        self.prompts.lock().unwrap().push(request.messages[0].content.clone());

        self.reply
            .clone()
            .ok_or_else(|| Error::Inference("engine unavailable".to_string()))
    }
}

/// Storage engine where every statement fails
pub struct FailingStorage;

#[async_trait]
impl StorageEngine for FailingStorage {
    async fn execute(&self, _statement: &str, _params: Vec<Param>) -> Result<QueryOutcome> {
        Err(Error::Io(std::io::Error::other("storage offline")))
    }
}

/// Storage engine that accepts schema statements but fails inserts
pub struct ReadOnlyStorage;

#[async_trait]
impl StorageEngine for ReadOnlyStorage {
    async fn execute(&self, statement: &str, _params: Vec<Param>) -> Result<QueryOutcome> {
        if statement.trim_start().starts_with("INSERT") {
            return Err(Error::Io(std::io::Error::other("read-only store")));
        }
        Ok(QueryOutcome::Rows { rows: Vec::new() })
    }
}

/// Storage engine that answers every SELECT with a fixed outcome
pub struct ShapedStorage {
    pub outcome: QueryOutcome,
}

#[async_trait]
impl StorageEngine for ShapedStorage {
    async fn execute(&self, statement: &str, _params: Vec<Param>) -> Result<QueryOutcome> {
        if statement.trim_start().starts_with("SELECT") {
            return Ok(self.outcome.clone());
        }
        Ok(QueryOutcome::Rows { rows: Vec::new() })
    }
}

/// SQLite store that logs every statement and answers slowly
pub struct CountingStorage {
    inner: SqliteStore,
    statements: Mutex<Vec<String>>,
}

impl CountingStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: SqliteStore::open_in_memory().unwrap(),
            statements: Mutex::new(Vec::new()),
        })
    }

    pub fn count_matching(&self, needle: &str) -> usize {
        self.statements
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.contains(needle))
            .count()
    }
}

#[async_trait]
impl StorageEngine for CountingStorage {
    async fn execute(&self, statement: &str, params: Vec<Param>) -> Result<QueryOutcome> {
        self.statements.lock().unwrap().push(statement.to_string());
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.inner.execute(statement, params).await
    }
}

/// Agent backed by a fresh in-memory SQLite store
pub fn sqlite_agent(inference: Arc<StubInference>) -> ReviewAgent {
    let storage = SqliteStore::open_in_memory().unwrap();
    ReviewAgent::new("test-reviewer", inference, Arc::new(storage))
}
