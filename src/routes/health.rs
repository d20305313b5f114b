use crate::{error::AppError, state::AppState, types::HealthResponse};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

// Liveness: no filesystem access
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok", timestamp: chrono::Utc::now().to_rfc3339() })
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

// API description served at `/`
pub async fn index() -> impl IntoResponse {
    let body = json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "endpoints": {
            "GET /api/categories": "List all categories",
            "GET /api/categories/:category/files": "List files in a category",
            "GET /api/files": "List all files across categories",
            "GET /api/files/:category/:filename": "Stream a file inline",
            "GET /api/download/:category/:filename": "Download a file as attachment",
            "GET /api/search?q=&type=": "Search files by name/category and type (image|video)",
            "GET /api/health": "Health check",
            "GET /api/metrics": "Request counters",
        }
    });
    (StatusCode::OK, Json(body))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
