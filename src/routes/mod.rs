//! HTTP route handlers for the MediaShelf API.
//!
//! - `categories`: category listing and the files of one category
//! - `files`: flat listing of all files, inline streaming and downloads
//! - `search`: substring / type search across all categories
//! - `health`: liveness, metrics and the API description at `/`

pub mod categories;
pub mod files;
pub mod health;
pub mod search;

use anyhow::anyhow;
use axum::{routing::get, Router};
use tokio::task::spawn_blocking;

use crate::{
    error::{AppError, AppResult},
    library::{Library, LibraryResult},
    state::AppState,
};

/// All API routes with state attached. Layers are added by the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index))
        .route("/api/health", get(health::health))
        .route("/api/metrics", get(health::metrics))
        .route("/api/categories", get(categories::list_categories))
        .route("/api/categories/{category}/files", get(categories::list_category_files))
        .route("/api/files", get(files::list_all_files))
        .route("/api/files/{category}/{filename}", get(files::stream_file))
        .route("/api/download/{category}/{filename}", get(files::download_file))
        .route("/api/search", get(search::search))
        .fallback(health::not_found)
        .with_state(state)
}

/// Runs a blocking library operation on the blocking thread pool.
pub(crate) async fn run_blocking<T, F>(state: &AppState, op: F) -> AppResult<T>
where
    F: FnOnce(&Library) -> LibraryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let library = state.library.clone();
    let result = spawn_blocking(move || op(&library))
        .await
        .map_err(|e| AppError::Internal(anyhow!("library task join error: {}", e)))?;
    Ok(result?)
}
