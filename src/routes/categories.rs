use axum::{
    extract::{Path, State},
    Json,
};

use super::run_blocking;
use crate::{
    error::AppResult,
    library::classify::format_bytes,
    state::AppState,
    types::{CategoriesResponse, CategoryFilesResponse},
};

pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<CategoriesResponse>> {
    state.metrics.inc_category_listings();
    let mut categories = run_blocking(&state, |lib| lib.list_categories()).await?;
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(CategoriesResponse { count: categories.len(), categories }))
}

pub async fn list_category_files(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<CategoryFilesResponse>> {
    state.metrics.inc_file_listings();
    let name = category.clone();
    let mut files = run_blocking(&state, move |lib| lib.list_files(&name)).await?;
    files.sort_by(|a, b| a.name.cmp(&b.name));
    let total_bytes = files.iter().fold(0u64, |acc, f| acc.saturating_add(f.size));
    Ok(Json(CategoryFilesResponse {
        category,
        count: files.len(),
        files,
        total_size: format_bytes(total_bytes),
        total_bytes,
    }))
}
