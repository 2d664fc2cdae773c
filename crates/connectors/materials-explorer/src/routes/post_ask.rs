use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};

use query_engine_execution::{QueryError, ResultRow};

use crate::{error::ServerError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    question: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    success: bool,
    question: String,
    sql: String,
    results: Vec<ResultRow>,
    execution_time_ms: f64,
}

/// Ask the bridge for SQL, then run the answer as a raw query. The answer is
/// untrusted and gets no more latitude than a user-typed statement.
pub async fn post_ask(
    State(state): State<AppState>,
    request: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ServerError> {
    let Json(request) = request?;
    let question = request.question.trim();
    if question.is_empty() {
        return Err(QueryError::BadRequest("Empty question".to_string()).into());
    }

    let bridge = state.bridge.as_ref().ok_or_else(|| {
        QueryError::UpstreamFailure("No LLM bridge is configured".to_string())
    })?;

    let sql = bridge
        .generate(question)
        .instrument(info_span!("Generate SQL"))
        .await?;
    tracing::info!(question, sql = %sql, "generated SQL");

    let result = state
        .service
        .run_raw_query(&sql)
        .instrument(info_span!("Run generated query"))
        .await?;

    Ok(Json(AskResponse {
        success: true,
        question: question.to_string(),
        sql,
        results: result.rows,
        execution_time_ms: result.elapsed_ms,
    }))
}
