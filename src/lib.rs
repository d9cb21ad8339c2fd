//! # Codecritic - Code Review Agent
//!
//! A small service that forwards code snippets to a hosted LLM for review
//! and keeps a history of the feedback it received.
//!
//! Codecritic provides:
//! - A stateless router mapping `/api/*` onto a single named review agent
//! - A stateful review agent owning an append-only table of past reviews
//! - Pluggable inference and storage engines behind async traits
//! - Normalization of the unstable response shapes both engines return

pub mod review;
pub mod inference;
pub mod storage;
pub mod agent;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use review::{ReviewRecord, HistoryEntry};
pub use inference::{InferenceEngine, InferenceReply, HttpInference};
pub use storage::{StorageEngine, QueryOutcome, SqliteStore};
pub use agent::{ReviewAgent, AgentDirectory};

/// Result type alias for Codecritic operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Codecritic operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Background task failed: {0}")]
    Task(String),
}
