use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
};
use serde::Deserialize;
use tracing::{info_span, Instrument};

use query_engine_execution::QueryError;

use super::{execution_response, ResponseFormat};
use crate::{error::ServerError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    id: Option<String>,
    #[serde(default)]
    format: ResponseFormat,
}

/// Run a catalog query by identifier.
pub async fn get_query(
    State(state): State<AppState>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Response, ServerError> {
    let Query(params) = params?;
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| QueryError::BadRequest("No query id provided".to_string()))?;

    let result = state
        .service
        .run_catalog_query(&id)
        .instrument(info_span!("Run catalog query", query.id = %id))
        .await?;

    Ok(execution_response(result, params.format))
}
