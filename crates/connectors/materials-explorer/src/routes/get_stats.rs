use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info_span, Instrument};

use query_engine_execution::Stats;

use crate::{error::ServerError, state::AppState};

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    success: bool,
    #[serde(flatten)]
    stats: Stats,
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ServerError> {
    let stats = state
        .service
        .get_stats()
        .instrument(info_span!("Get stats"))
        .await?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
