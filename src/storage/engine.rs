use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::Result;

/// One result row, keyed by column name
pub type Row = Map<String, Value>;

/// Positional statement parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Text(String),
    Integer(i64),
    Null,
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Integer(value)
    }
}

/// Shapes a statement result may take
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    Results { results: Vec<Row> },
    Rows { rows: Vec<Row> },
    Other(Value),
}

impl QueryOutcome {
    /// Row list under either known field name, empty for anything else
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            QueryOutcome::Results { results } => results,
            QueryOutcome::Rows { rows } => rows,
            QueryOutcome::Other(_) => Vec::new(),
        }
    }

    /// Decode every row into `T`, skipping rows that don't fit
    pub fn decode<T: DeserializeOwned>(self) -> Vec<T> {
        self.into_rows()
            .into_iter()
            .filter_map(|row| match serde_json::from_value(Value::Object(row)) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::debug!("Skipping undecodable row: {}", e);
                    None
                }
            })
            .collect()
    }
}

/// Trait for SQL-speaking storage backends
#[async_trait]
pub trait StorageEngine: Send + Sync {
    /// Execute one statement with positional parameters (`?1`, `?2`, ...)
    async fn execute(&self, statement: &str, params: Vec<Param>) -> Result<QueryOutcome>;
}
