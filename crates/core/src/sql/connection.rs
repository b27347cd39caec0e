//! Per-call database connections and statement execution.

use crate::Error;
use serde_json::{Number, Value};
use std::path::PathBuf;
use tokio_rusqlite::Connection;
use tokio_rusqlite::rusqlite::{self, types::ValueRef};

/// Result of executing a single SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlOutcome {
    /// The statement produced a result set.
    Rows { columns: Vec<String>, rows: Vec<Vec<Value>> },
    /// The statement modified data; carries the affected row count.
    Affected(usize),
}

/// Executes statements against the SQLite database at a fixed path.
///
/// Holds only the path. Each call to [`SqlExecutor::execute`] opens a fresh
/// connection on a background thread and closes it before returning.
#[derive(Debug, Clone)]
pub struct SqlExecutor {
    path: PathBuf,
}

impl SqlExecutor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Execute one statement and collect its outcome.
    pub async fn execute(&self, query: &str) -> Result<SqlOutcome, Error> {
        let conn = Connection::open(&self.path)
            .await
            .map_err(|e| Error::Database(e.into()))?;

        let sql = query.to_string();
        let outcome = conn
            .call(move |conn| -> Result<SqlOutcome, Error> { run_statement(conn, &sql) })
            .await
            .map_err(Error::from);

        if let Err(e) = conn.close().await {
            tracing::warn!("failed to close SQL connection: {}", e);
        }

        match &outcome {
            Ok(SqlOutcome::Rows { rows, .. }) => tracing::debug!(rows = rows.len(), "SQL query returned rows"),
            Ok(SqlOutcome::Affected(n)) => tracing::debug!(affected = n, "SQL statement executed"),
            Err(e) => tracing::error!("error executing SQL query: {}", e),
        }

        outcome
    }
}

fn run_statement(conn: &rusqlite::Connection, sql: &str) -> Result<SqlOutcome, Error> {
    let mut stmt = conn.prepare(sql)?;

    if stmt.column_count() == 0 {
        let affected = stmt.execute([])?;
        return Ok(SqlOutcome::Affected(affected));
    }

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let mut result = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut record = Vec::with_capacity(width);
        for idx in 0..width {
            record.push(to_json(row.get_ref(idx)?));
        }
        result.push(record);
    }

    Ok(SqlOutcome::Rows { columns, rows: result })
}

/// Convert a SQLite value into JSON; blobs are summarized rather than inlined.
fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(format!("BINARY DATA ({} bytes)", b.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor() -> (tempfile::TempDir, SqlExecutor) {
        let dir = tempfile::tempdir().unwrap();
        let executor = SqlExecutor::new(dir.path().join("test.sqlite"));
        (dir, executor)
    }

    #[tokio::test]
    async fn test_select_literal() {
        let (_dir, db) = executor();
        let outcome = db.execute("SELECT 1 AS one, 'two' AS two").await.unwrap();
        assert_eq!(
            outcome,
            SqlOutcome::Rows {
                columns: vec!["one".into(), "two".into()],
                rows: vec![vec![Value::from(1), Value::from("two")]],
            }
        );
    }

    #[tokio::test]
    async fn test_state_persists_across_calls() {
        let (_dir, db) = executor();
        db.execute("CREATE TABLE items (id INTEGER PRIMARY KEY, name TEXT)").await.unwrap();

        let inserted = db.execute("INSERT INTO items (name) VALUES ('a'), ('b')").await.unwrap();
        assert_eq!(inserted, SqlOutcome::Affected(2));

        match db.execute("SELECT name FROM items ORDER BY id").await.unwrap() {
            SqlOutcome::Rows { columns, rows } => {
                assert_eq!(columns, vec!["name".to_string()]);
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1][0], Value::from("b"));
            }
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blob_and_null_values() {
        let (_dir, db) = executor();
        let outcome = db.execute("SELECT x'DEADBEEF' AS data, NULL AS missing, 1.5 AS ratio").await.unwrap();
        match outcome {
            SqlOutcome::Rows { rows, .. } => {
                assert_eq!(rows[0][0], Value::from("BINARY DATA (4 bytes)"));
                assert_eq!(rows[0][1], Value::Null);
                assert_eq!(rows[0][2], Value::from(1.5));
            }
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_sql() {
        let (_dir, db) = executor();
        let result = db.execute("SELEC nonsense").await;
        assert!(matches!(result, Err(Error::Database(_))));
    }
}
