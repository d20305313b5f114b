use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error;
use std::fmt;

use crate::library::LibraryError;

/// The primary error type for the HTTP layer.
///
/// Library errors are folded into these variants; every variant knows its
/// status code and JSON envelope.
#[derive(Debug)]
pub enum AppError {
    /// For internal server errors that are not expected to be handled by the client.
    Internal(anyhow::Error),
    /// For when a requested category or file is not found.
    NotFound(String),
    /// For when user input is invalid (bad search parameters, path escapes).
    InvalidInput(String),
    /// For errors related to filesystem operations.
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Internal(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, error_message, error_id) = match self {
            AppError::Internal(e) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!("Internal error {}: {:?}", error_id, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    Some(error_id),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg, None),
            AppError::IoError(msg) => {
                // Details stay in the log, clients only get the id
                let error_id = uuid::Uuid::new_v4();
                tracing::error!("I/O error {}: {}", error_id, msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "An I/O error occurred".to_string(),
                    Some(error_id),
                )
            }
        };

        let mut body = json!({
            "error": error_message,
            "code": error_code,
            "status": status.as_u16(),
        });
        if let Some(id) = error_id {
            body["error_id"] = json!(id.to_string());
        }

        (status, Json(body)).into_response()
    }
}

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::NotFound(msg) => AppError::NotFound(msg),
            LibraryError::InvalidArgument(msg) => AppError::InvalidInput(msg),
            io @ LibraryError::Io { .. } => AppError::IoError(io.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the HTTP layer.
pub type AppResult<T> = Result<T, AppError>;
