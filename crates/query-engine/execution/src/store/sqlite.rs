//! SQLite store, used for local development and tests.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use tracing::{info_span, Instrument};

use super::statement::{ensure_single_statement, Dialect};
use super::{PoolStatus, Store};
use crate::error::StoreError;
use crate::value::{ResultRow, ScalarValue};

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    statement_timeout: Duration,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool, statement_timeout: Duration) -> Self {
        SqliteStore {
            pool,
            statement_timeout,
        }
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn execute(&self, sql: &str) -> Result<Vec<ResultRow>, StoreError> {
        ensure_single_statement(sql, Dialect::Sqlite)?;

        let rows = tokio::time::timeout(
            self.statement_timeout,
            sqlx::query(sql).fetch_all(&self.pool),
        )
        .instrument(info_span!("Database request", db.system = "sqlite"))
        .await
        .map_err(|_| StoreError::Timeout(self.statement_timeout))??;

        Ok(rows
            .iter()
            .map(decode_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    fn pool_status(&self) -> Option<PoolStatus> {
        Some(PoolStatus {
            size: self.pool.size(),
            idle: self.pool.num_idle(),
        })
    }
}

fn decode_row(row: &SqliteRow) -> Result<ResultRow, sqlx::Error> {
    row.columns()
        .iter()
        .map(|column| {
            let value = decode_column(row, column.ordinal())?;
            Ok((column.name().to_string(), value))
        })
        .collect()
}

/// SQLite is dynamically typed, so we go by the storage class of the value
/// itself rather than the declared column type.
fn decode_column(row: &SqliteRow, index: usize) -> Result<ScalarValue, sqlx::Error> {
    let storage_class = {
        let raw = row.try_get_raw(index)?;
        if raw.is_null() {
            return Ok(ScalarValue::Null);
        }
        raw.type_info().name().to_string()
    };

    let value = match storage_class.as_str() {
        "INTEGER" | "BOOLEAN" => ScalarValue::Integer(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" | "NUMERIC" => ScalarValue::Float(row.try_get_unchecked::<f64, _>(index)?),
        "BLOB" => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            ScalarValue::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        _ => ScalarValue::Text(row.try_get_unchecked::<String, _>(index)?),
    };

    Ok(value)
}
