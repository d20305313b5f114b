use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::run_blocking;
use crate::{
    error::AppResult,
    library::search::parse_type_filter,
    state::AppState,
    types::SearchResponse,
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default, rename = "type")]
    pub file_type: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    state.metrics.inc_searches();
    let file_type = match params.file_type.as_deref() {
        Some(raw) => parse_type_filter(raw)?,
        None => None,
    };
    let query = params.q.filter(|q| !q.is_empty());

    let q = query.clone();
    let mut results = run_blocking(&state, move |lib| lib.search(q.as_deref(), file_type)).await?;
    results.sort_by(|a, b| (&a.category, &a.file.name).cmp(&(&b.category, &b.file.name)));

    Ok(Json(SearchResponse { count: results.len(), results, query, file_type }))
}
