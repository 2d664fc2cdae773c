use axum::{extract::State, http::header, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};

use crate::{error::ServerError, state::AppState};

/// Prometheus text exposition of every registered metric.
pub async fn get_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
    state.service.update_pool_metrics();

    let encoder = TextEncoder::new();
    let body = encoder
        .encode_to_string(&state.metrics_registry.gather())
        .map_err(|error| ServerError::Internal(error.to_string()))?;

    Ok(([(header::CONTENT_TYPE, encoder.format_type().to_string())], body))
}
