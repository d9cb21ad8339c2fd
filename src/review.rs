//! Review types - the persisted record and the bodies exchanged with the agent
//!
//! A review record is the only entity this system stores. Records are
//! append-only: created by the submit operation, read by history and
//! suggestions, never updated or deleted.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A persisted review: one code submission and the feedback it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Assigned by the store on insert, strictly increasing
    pub id: i64,
    /// Full source text as submitted
    pub code: String,
    /// Caller-chosen language label (free-form)
    pub language: String,
    /// Normalized text produced by the inference engine
    pub feedback: String,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl ReviewRecord {
    /// Create a record for insertion (id will be set by the store)
    pub fn new(
        code: impl Into<String>,
        language: impl Into<String>,
        feedback: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: 0,
            code: code.into(),
            language: language.into(),
            feedback: feedback.into(),
            timestamp,
        }
    }
}

/// Projection of a record returned by the history listing.
///
/// `code` and `feedback` are left out to keep the listing small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub language: String,
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Creation time as a UTC datetime, if the stored value is in range
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub code: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub pattern: String,
}

/// `suggestions` is `null` when no stored code matched the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Option<String>,
}
