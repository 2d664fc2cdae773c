use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use query_engine_execution::{ErrorKind, QueryError};

use crate::bridge::BridgeError;

/// Everything a handler can fail with. Each variant becomes the uniform
/// `{"success": false, "error": ...}` envelope.
#[derive(Debug)]
pub enum ServerError {
    Query(QueryError),
    RouteNotFound(String),
    MethodNotAllowed { method: String, path: String },
    Internal(String),
}

#[derive(Serialize)]
struct JsonErrorResponse {
    success: bool,
    error: String,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Query(error) => match error.kind() {
                ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
                ErrorKind::PolicyViolation => StatusCode::FORBIDDEN,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::ExecutionFailure => StatusCode::INTERNAL_SERVER_ERROR,
                ErrorKind::UpstreamFailure => StatusCode::BAD_GATEWAY,
            },
            ServerError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (kind, message) = match self {
            ServerError::Query(error) => (error.kind().to_string(), error.to_string()),
            ServerError::RouteNotFound(path) => {
                ("NotFound".to_string(), format!("No route for {path}"))
            }
            ServerError::MethodNotAllowed { method, path } => (
                "MethodNotAllowed".to_string(),
                format!("Method {method} is not allowed on {path}"),
            ),
            ServerError::Internal(message) => ("Internal".to_string(), message),
        };

        if status.is_server_error() {
            tracing::error!(error.kind = %kind, status = %status, "{message}");
        } else {
            tracing::warn!(error.kind = %kind, status = %status, "{message}");
        }

        (
            status,
            Json(JsonErrorResponse {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

impl From<QueryError> for ServerError {
    fn from(value: QueryError) -> Self {
        ServerError::Query(value)
    }
}

impl From<BridgeError> for ServerError {
    fn from(value: BridgeError) -> Self {
        ServerError::Query(QueryError::UpstreamFailure(value.to_string()))
    }
}

/// Malformed bodies are bad requests, reported in our envelope rather than
/// axum's plain-text rejection.
impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        ServerError::Query(QueryError::BadRequest(value.body_text()))
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        ServerError::Query(QueryError::BadRequest(value.body_text()))
    }
}
