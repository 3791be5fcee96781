// error.rs — Error types for the HTTP layer and configuration loading.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use gb_goal::GoalError;

/// Errors a handler can turn into an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No goal matched the id in the path.
    #[error("Goal not found")]
    NotFound,

    /// Anything else the store reported.
    #[error("{0}")]
    Internal(String),
}

impl From<GoalError> for ApiError {
    fn from(e: GoalError) -> Self {
        match e {
            GoalError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Errors from loading `goalboard.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid seed: {0}")]
    InvalidSeed(String),
}
