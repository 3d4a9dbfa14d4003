use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    /// Whether the remote learning API answered its own health check.
    upstream: bool,
    uptime: u64,
}

pub async fn health(State(state): State<AppState>) -> Response {
    let upstream = state.api().health_check().await;
    if !upstream {
        tracing::debug!(base_url = state.api().base_url(), "upstream api unreachable");
    }

    Json(HealthResponse {
        status: "ok",
        upstream,
        uptime: state.uptime_seconds(),
    })
    .into_response()
}
