use axum::{extract::State, Json};
use serde::Serialize;

use query_engine_metadata::metadata::QueryDefinition;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QueriesResponse {
    success: bool,
    queries: Vec<QueryDefinition>,
}

/// The catalog, in display order.
pub async fn get_queries(State(state): State<AppState>) -> Json<QueriesResponse> {
    Json(QueriesResponse {
        success: true,
        queries: state.service.catalog().iter().cloned().collect(),
    })
}
