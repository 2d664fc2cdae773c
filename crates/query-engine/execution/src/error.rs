//! Errors for query execution.

use std::time::Duration;

use thiserror::Error;

/// A failure reported by the data store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend rejected the statement or the connection failed. The
    /// message is the backend's own.
    #[error("{0}")]
    Database(String),
    #[error("statement exceeded the timeout of {} ms", .0.as_millis())]
    Timeout(Duration),
    #[error("multiple statements are not allowed")]
    MultipleStatements,
    #[error("{0}")]
    UnexpectedShape(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error.as_database_error() {
            Some(database_error) => StoreError::Database(database_error.message().to_string()),
            None => StoreError::Database(error.to_string()),
        }
    }
}

/// Every non-fatal way a request can fail. Each one is converted into the
/// uniform error envelope at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Missing or empty required input.
    #[error("{0}")]
    BadRequest(String),
    #[error("Query not found")]
    NotFound { id: String },
    #[error("Only SELECT queries are allowed")]
    PolicyViolation,
    #[error("Query execution failed: {0}")]
    ExecutionFailure(#[from] StoreError),
    /// The natural-language bridge was unreachable or gave no usable answer.
    #[error("{0}")]
    UpstreamFailure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    PolicyViolation,
    ExecutionFailure,
    UpstreamFailure,
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::BadRequest(_) => ErrorKind::BadRequest,
            QueryError::NotFound { .. } => ErrorKind::NotFound,
            QueryError::PolicyViolation => ErrorKind::PolicyViolation,
            QueryError::ExecutionFailure(_) => ErrorKind::ExecutionFailure,
            QueryError::UpstreamFailure(_) => ErrorKind::UpstreamFailure,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::PolicyViolation => "PolicyViolation",
            ErrorKind::ExecutionFailure => "ExecutionFailure",
            ErrorKind::UpstreamFailure => "UpstreamFailure",
        };
        write!(f, "{name}")
    }
}
