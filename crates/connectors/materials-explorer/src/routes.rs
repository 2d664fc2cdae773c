//! The HTTP surface.

mod get_health;
mod get_metrics;
mod get_queries;
mod get_query;
mod get_stats;
mod post_ask;
mod post_custom;

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    http::{header, Method, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use query_engine_execution::{ExecutionResult, ResultRow};
use query_engine_metadata::metadata::QueryDefinition;

use crate::error::ServerError;
use crate::export::rows_to_csv;
use crate::state::AppState;

pub use get_health::get_health;
pub use get_metrics::get_metrics;
pub use get_queries::get_queries;
pub use get_query::get_query;
pub use get_stats::get_stats;
pub use post_ask::post_ask;
pub use post_custom::post_custom;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(get_health).fallback(method_not_allowed))
        .route("/queries", get(get_queries).fallback(method_not_allowed))
        .route("/stats", get(get_stats).fallback(method_not_allowed))
        .route("/query", get(get_query).fallback(method_not_allowed))
        .route("/custom", post(post_custom).fallback(method_not_allowed))
        .route("/ask", post(post_ask).fallback(method_not_allowed))
        .route("/metrics", get(get_metrics).fallback(method_not_allowed))
        .fallback(route_not_found)
        .with_state(state)
}

async fn route_not_found(uri: Uri) -> ServerError {
    ServerError::RouteNotFound(uri.path().to_string())
}

async fn method_not_allowed(method: Method, uri: Uri) -> ServerError {
    ServerError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// How `/query` and `/custom` render their rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<QueryDefinition>,
    results: Vec<ResultRow>,
    execution_time_ms: f64,
}

fn execution_response(result: ExecutionResult, format: ResponseFormat) -> Response {
    match format {
        ResponseFormat::Json => Json(ExecutionResponse {
            success: true,
            query: result.query,
            results: result.rows,
            execution_time_ms: result.elapsed_ms,
        })
        .into_response(),
        ResponseFormat::Csv => csv_response(&result.rows),
    }
}

fn csv_response(rows: &[ResultRow]) -> Response {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let disposition = format!("attachment; filename=\"materials_query_results_{millis}.csv\"");

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rows_to_csv(rows),
    )
        .into_response()
}
