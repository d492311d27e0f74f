use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::validation::IssueList;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(mongodb::error::Error),
    ConfigError(String),
    InternalError(String),
    BadRequest(String),
    /// Request body failed its declared shape.
    Validation(IssueList),
    /// Path parameters failed validation.
    InvalidParams(IssueList),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(e) => write!(f, "Database error: {}", e),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(e) | AppError::InvalidParams(e) => {
                write!(f, "Validation failed: {}", e)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl From<IssueList> for AppError {
    fn from(err: IssueList) -> Self {
        AppError::Validation(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::DatabaseError(ref e) => {
                tracing::error!("Database error: {:?}", e);
                internal_server_error()
            }
            AppError::ConfigError(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                internal_server_error()
            }
            AppError::InternalError(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                internal_server_error()
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": msg }))).into_response()
            }
            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": { "issues": e.issues },
                })),
            )
                .into_response(),
            AppError::InvalidParams(e) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "Invalid request body",
                    "errors": e.issues,
                })),
            )
                .into_response(),
        }
    }
}

fn internal_server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal server error" })),
    )
        .into_response()
}
