//! The data store adapter: executes one read-only statement and returns its
//! rows as ordered maps of column name to value.

mod mysql;
mod sqlite;
pub mod statement;

use async_trait::async_trait;

pub use mysql::MySqlStore;
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use crate::value::ResultRow;

/// Something that can run a single SQL statement.
///
/// Implementations acquire a connection per call and release it on every
/// exit path, bound execution by a timeout and refuse text that contains
/// more than one statement.
#[async_trait]
pub trait Store: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<Vec<ResultRow>, StoreError>;

    /// A snapshot of the connection pool, if the store has one.
    fn pool_status(&self) -> Option<PoolStatus> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    pub size: u32,
    pub idle: usize,
}
