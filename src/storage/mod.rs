//! Storage Layer - SQL-speaking persistence behind `StorageEngine`
//!
//! The agent owns a single append-only table:
//! - reviews(id, code, language, feedback, ts)
//!
//! Results come back as a `QueryOutcome`, whose row list may sit under
//! `results` or `rows` depending on the engine.

pub mod schema;
pub mod engine;
pub mod sqlite;

pub use engine::{StorageEngine, QueryOutcome, Param, Row};
pub use sqlite::SqliteStore;
