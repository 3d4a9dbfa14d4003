mod api;
mod health;
mod pages;

use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

const STYLESHEET: &str = include_str!("../../assets/app.css");

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route(
            "/register",
            get(pages::registration_form).post(pages::register),
        )
        .route("/logout", post(pages::logout))
        .route("/learning-areas", get(pages::learning_areas))
        .route("/learning/:area", get(pages::area_entry))
        .route("/learning/:area/module/:module_id", get(pages::module_page))
        .route(
            "/learning/:area/module/:module_id/lessons/:lesson_id/complete",
            post(pages::complete_lesson),
        )
        .route(
            "/learning/:area/module/:module_id/lessons/:lesson_id/run",
            post(pages::run_exercise),
        )
        .route(
            "/learning/:area/module/:module_id/quiz",
            post(pages::submit_quiz),
        )
        .route("/404", get(pages::not_found))
        .route("/health", get(health::health))
        .route(
            "/api/session",
            get(api::current_session).delete(api::clear_session),
        )
        .route("/api/progress/:area", get(api::area_progress))
        .route("/static/app.css", get(stylesheet))
        .fallback(fallback_handler)
        .with_state(state)
}

async fn stylesheet() -> Response {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLESHEET,
    )
        .into_response()
}

async fn fallback_handler() -> Response {
    Redirect::to("/404").into_response()
}
