use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Response,
    Json,
};
use serde::Deserialize;
use tracing::{info_span, Instrument};

use super::{execution_response, ResponseFormat};
use crate::{error::ServerError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct FormatParams {
    #[serde(default)]
    format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
pub struct CustomQueryRequest {
    #[serde(default)]
    sql: String,
}

/// Run caller-supplied SQL through the read-only policy.
pub async fn post_custom(
    State(state): State<AppState>,
    params: Result<Query<FormatParams>, QueryRejection>,
    request: Result<Json<CustomQueryRequest>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Query(params) = params?;
    let Json(request) = request?;

    let result = state
        .service
        .run_raw_query(&request.sql)
        .instrument(info_span!("Run custom query"))
        .await?;

    Ok(execution_response(result, params.format))
}
