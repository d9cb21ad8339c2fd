//! SQLite storage implementation

use std::path::Path;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, ToSql};
use serde_json::Value;
use crate::{Error, Result};
use super::engine::{Param, QueryOutcome, Row, StorageEngine};

/// SQLite-backed `StorageEngine`
///
/// Statements run on the blocking pool; the connection is shared behind a
/// mutex so one statement executes at a time.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a database file (creates it and its parent directory if missing)
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Ok(Self::from_connection(conn))
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

#[async_trait]
impl StorageEngine for SqliteStore {
    async fn execute(&self, statement: &str, params: Vec<Param>) -> Result<QueryOutcome> {
        let conn = Arc::clone(&self.conn);
        let statement = statement.to_string();

        let rows = tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| Error::Task("sqlite connection lock poisoned".to_string()))?;
            query_rows(&conn, &statement, &params).map_err(Error::from)
        })
        .await
        .map_err(|e| Error::Task(e.to_string()))??;

        Ok(QueryOutcome::Rows { rows })
    }
}

/// Run a statement and collect every row it yields as a JSON object
fn query_rows(conn: &Connection, statement: &str, params: &[Param]) -> rusqlite::Result<Vec<Row>> {
    let mut stmt = conn.prepare(statement)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut object = Row::new();
        for (idx, name) in columns.iter().enumerate() {
            object.insert(name.clone(), value_to_json(row.get_ref(idx)?));
        }
        out.push(object);
    }
    Ok(out)
}

fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}

impl ToSql for Param {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Param::Text(text) => ToSqlOutput::Borrowed(ValueRef::Text(text.as_bytes())),
            Param::Integer(i) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*i)),
            Param::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
        })
    }
}
