//! MySQL (and MariaDB) store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::types::chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use tracing::{info_span, Instrument};

use super::statement::{ensure_single_statement, Dialect};
use super::{PoolStatus, Store};
use crate::error::StoreError;
use crate::value::{ResultRow, ScalarValue};

#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
    statement_timeout: Duration,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool, statement_timeout: Duration) -> Self {
        MySqlStore {
            pool,
            statement_timeout,
        }
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn execute(&self, sql: &str) -> Result<Vec<ResultRow>, StoreError> {
        ensure_single_statement(sql, Dialect::MySql)?;

        // `sqlx::query` always goes through a prepared statement, and the
        // server refuses to prepare more than one statement at a time.
        let rows = tokio::time::timeout(
            self.statement_timeout,
            sqlx::query(sql).fetch_all(&self.pool),
        )
        .instrument(info_span!("Database request", db.system = "mysql"))
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

fn decode_row(row: &MySqlRow) -> Result<ResultRow, sqlx::Error> {
    row.columns()
        .iter()
        .map(|column| {
            let value = decode_column(row, column.ordinal(), column.type_info().name())?;
            Ok((column.name().to_string(), value))
        })
        .collect()
}

fn decode_column(row: &MySqlRow, index: usize, type_name: &str) -> Result<ScalarValue, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(ScalarValue::Null);
    }

    let value = match type_name {
        "BOOLEAN" => ScalarValue::Boolean(row.try_get(index)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
            ScalarValue::Integer(row.try_get_unchecked::<i64, _>(index)?)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => {
            let value = row.try_get_unchecked::<u64, _>(index)?;
            match i64::try_from(value) {
                Ok(value) => ScalarValue::Integer(value),
                Err(_) => ScalarValue::Text(value.to_string()),
            }
        }
        // Going through the shortest decimal rendering keeps 0.611 from
        // turning into 0.6110000014305115.
        "FLOAT" => {
            let value = row.try_get::<f32, _>(index)?;
            ScalarValue::Float(value.to_string().parse().unwrap_or(f64::from(value)))
        }
        "DOUBLE" => ScalarValue::Float(row.try_get(index)?),
        "DECIMAL" => {
            let text = row.try_get_unchecked::<String, _>(index)?;
            match text.parse::<f64>() {
                Ok(value) => ScalarValue::Float(value),
                Err(_) => ScalarValue::Text(text),
            }
        }
        "DATE" => ScalarValue::Text(row.try_get::<NaiveDate, _>(index)?.to_string()),
        "DATETIME" | "TIMESTAMP" => {
            ScalarValue::Text(row.try_get::<NaiveDateTime, _>(index)?.to_string())
        }
        "TIME" => ScalarValue::Text(row.try_get::<NaiveTime, _>(index)?.to_string()),
        "CHAR" | "VARCHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" | "SET"
        | "JSON" => ScalarValue::Text(row.try_get_unchecked::<String, _>(index)?),
        _ => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            ScalarValue::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
    };

    Ok(value)
}
