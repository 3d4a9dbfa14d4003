pub mod catalog;
pub mod config;
pub mod logging;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;
pub mod views;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::state::AppState;
use crate::storage::{LocalStorage, StorageError};

pub fn create_app(config: Config) -> Result<axum::Router, StorageError> {
    let storage = Arc::new(LocalStorage::open(config.storage_path())?);
    Ok(create_app_with_storage(config, storage))
}

pub fn create_app_with_storage(config: Config, storage: Arc<LocalStorage>) -> axum::Router {
    let state = AppState::new(config, storage);

    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
