use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::TryStreamExt;

use super::run_blocking;
use crate::{
    error::AppResult,
    library::content::{open_stream, Disposition},
    state::AppState,
    types::AllFilesResponse,
};

pub async fn list_all_files(State(state): State<AppState>) -> AppResult<Json<AllFilesResponse>> {
    state.metrics.inc_file_listings();
    let mut files = run_blocking(&state, |lib| lib.list_all_files()).await?;
    files.sort_by(|a, b| (&a.category, &a.file.name).cmp(&(&b.category, &b.file.name)));
    Ok(Json(AllFilesResponse { count: files.len(), files }))
}

pub async fn stream_file(
    State(state): State<AppState>,
    Path((category, filename)): Path<(String, String)>,
) -> AppResult<Response> {
    serve_file(state, category, filename, Disposition::Inline).await
}

pub async fn download_file(
    State(state): State<AppState>,
    Path((category, filename)): Path<(String, String)>,
) -> AppResult<Response> {
    serve_file(state, category, filename, Disposition::Attachment).await
}

async fn serve_file(
    state: AppState,
    category: String,
    filename: String,
    disposition: Disposition,
) -> AppResult<Response> {
    let resolved =
        run_blocking(&state, move |lib| lib.resolve_for_stream(&category, &filename)).await?;
    let stream = open_stream(&resolved, state.config.library.stream_buffer_size).await?;

    match disposition {
        Disposition::Inline => state.metrics.inc_streams(),
        Disposition::Attachment => state.metrics.inc_downloads(),
    }
    tracing::info!("serving {} ({:?}, {} bytes)", resolved.path.display(), disposition, resolved.size);

    let metrics = state.metrics.clone();
    let body = Body::from_stream(stream.inspect_ok(move |chunk| metrics.add_bytes(chunk.len() as u64)));

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(resolved.content_type));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(resolved.size));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition.header_value(&resolved.filename)).unwrap_or_else(|_| {
            match disposition {
                Disposition::Inline => HeaderValue::from_static("inline"),
                Disposition::Attachment => HeaderValue::from_static("attachment"),
            }
        }),
    );

    Ok((StatusCode::OK, headers, body).into_response())
}
