use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::io;
use thiserror::Error;
use tracing::error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents errors originating from the database, typically from `sqlx`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents errors specific to the actor system, such as a closed mailbox.
    #[error("Actor error: {0}")]
    Actor(String),

    /// Represents data validation errors (e.g., missing journal content).
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Represents configuration-related errors (e.g., missing environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The language model API answered with an error.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Database(e) => AppError::Database(sqlx::Error::Protocol(e.to_string())),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Actor(s) => AppError::Actor(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Unauthorized(s) => AppError::Unauthorized(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Upstream(s) => AppError::Upstream(s.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
            AppError::Timeout(s) => AppError::Timeout(s.clone()),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(format!("HTTP request timed out: {}", err))
        } else {
            AppError::Upstream(format!("HTTP error: {}", err))
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::Internal(format!("Token error: {}", err))
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Database(sqlx::Error::Migrate(Box::new(err)))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "message": msg })),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, json!({ "error": msg })),
            AppError::Timeout(msg) => (StatusCode::GATEWAY_TIMEOUT, json!({ "error": msg })),
            other => {
                error!("Unhandled exception: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "An unexpected error occurred",
                        "message": other.to_string(),
                    }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
