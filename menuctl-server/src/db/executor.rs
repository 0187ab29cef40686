//! Query executor - run one parameterized statement, get rows back
//!
//! Provides a trait for statement execution, with:
//! - `PgExecutor` against the real pool
//! - `MockExecutor` with scripted results and a call log for tests
//!
//! Rows come back as ordered column-name → JSON value maps. Column order is
//! the SELECT order (serde_json `preserve_order`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row as _, TypeInfo};

use super::error::DbError;
use super::pool::DbPool;
use super::value::SqlValue;

/// One result row, columns in SELECT order.
pub type Row = Map<String, Value>;

/// Trait for statement execution (testable)
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn run(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Row>, DbError>;
}

/// Executor backed by the shared Postgres pool.
#[derive(Clone, Debug)]
pub struct PgExecutor {
    pool: DbPool,
}

impl PgExecutor {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn run(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Row>, DbError> {
        // Guard is dropped on every path out of this function.
        let mut conn = self.pool.acquire().await?;

        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                SqlValue::Int(v) => query.bind(v),
                SqlValue::Float(v) => query.bind(v),
                SqlValue::Text(v) => query.bind(v),
                SqlValue::Bool(v) => query.bind(v),
            };
        }

        let rows = query.fetch_all(&mut *conn).await.map_err(DbError::Query)?;
        tracing::debug!(rows = rows.len(), "statement executed");

        rows.iter().map(decode_row).collect()
    }
}

/// Convert a Postgres row to an ordered JSON map.
fn decode_row(row: &PgRow) -> Result<Row, DbError> {
    let mut out = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        let value = decode_column(row, column.ordinal(), column.name(), column.type_info().name())?;
        out.insert(column.name().to_owned(), value);
    }
    Ok(out)
}

fn decode_column(row: &PgRow, idx: usize, name: &str, type_name: &str) -> Result<Value, DbError> {
    let value = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(idx).map(|v| v.map(Value::from)),
        "INT2" => row.try_get::<Option<i16>, _>(idx).map(|v| v.map(Value::from)),
        "INT4" => row.try_get::<Option<i32>, _>(idx).map(|v| v.map(Value::from)),
        "INT8" => row.try_get::<Option<i64>, _>(idx).map(|v| v.map(Value::from)),
        "FLOAT4" => row.try_get::<Option<f32>, _>(idx).map(|v| v.map(Value::from)),
        "FLOAT8" => row.try_get::<Option<f64>, _>(idx).map(|v| v.map(Value::from)),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            row.try_get::<Option<String>, _>(idx).map(|v| v.map(Value::from))
        }
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(idx)
            .map(|v| v.map(|ts| Value::from(ts.to_rfc3339()))),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(idx)
            .map(|v| v.map(|ts| Value::from(ts.to_string()))),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(idx)
            .map(|v| v.map(|d| Value::from(d.to_string()))),
        other => {
            return Err(DbError::UnsupportedColumn {
                column: name.to_owned(),
                type_name: other.to_owned(),
            })
        }
    };

    Ok(value.map_err(DbError::Query)?.unwrap_or(Value::Null))
}

/// One recorded executor call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedStatement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Mock executor for testing
///
/// Returns queued results in order; with nothing queued it returns no rows.
#[derive(Default)]
pub struct MockExecutor {
    responses: Mutex<VecDeque<Result<Vec<Row>, DbError>>>,
    calls: Mutex<Vec<ExecutedStatement>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue rows for the next call.
    pub fn push_rows(&self, rows: Vec<Row>) {
        self.responses.lock().unwrap().push_back(Ok(rows));
    }

    /// Queue a failure for the next call.
    pub fn push_error(&self, err: DbError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    /// Number of statements run so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every statement run so far, oldest first.
    pub fn calls(&self) -> Vec<ExecutedStatement> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    async fn run(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Row>, DbError> {
        self.calls.lock().unwrap().push(ExecutedStatement {
            sql: sql.to_owned(),
            params,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
