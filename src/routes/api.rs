use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::catalog::LearningArea;
use crate::response::{AppError, SuccessResponse};
use crate::services::api_client::ApiResponse;
use crate::state::AppState;

pub async fn current_session(State(state): State<AppState>) -> Result<Response, AppError> {
    let user = state
        .session()
        .user()
        .ok_or_else(|| AppError::not_found("No registered user"))?;
    Ok(Json(ApiResponse::ok(user)).into_response())
}

pub async fn clear_session(State(state): State<AppState>) -> Result<Response, AppError> {
    state.session().clear_user()?;
    tracing::info!("session cleared via api");
    Ok(SuccessResponse::with_message((), "Session cleared").into_response())
}

/// Progress in one area for the registered user.
pub async fn area_progress(
    State(state): State<AppState>,
    Path(area): Path<String>,
) -> Result<Response, AppError> {
    let area: LearningArea = area
        .parse()
        .map_err(|err: crate::catalog::UnknownArea| AppError::bad_request(err.to_string()))?;
    let user = state
        .session()
        .user()
        .ok_or_else(|| AppError::not_found("No registered user"))?;

    let progress = state.progress().snapshot(area, &user.email);
    Ok(Json(ApiResponse::ok(progress)).into_response())
}
