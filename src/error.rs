//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every id-keyed lookup that misses.
pub const NOT_FOUND_MESSAGE: &str = "Bookmark not found";

/// Message returned for storage faults when error detail is not exposed.
pub const SERVER_ERROR_MESSAGE: &str = "server error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Failure of the backing store. Never retried.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("invalid database url: {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("Bookmark not found")]
    NotFound,
    #[error("Unauthorized request")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Storage(StorageError::Db(err))
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, Debug)]
pub struct ErrorDetail {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody {
            error: ErrorDetail {
                message: message.into(),
            },
        }
    }
}

/// Attached to 500 responses so the top-level fault renderer can decide how much to reveal.
#[derive(Clone, Debug)]
pub struct StorageFault(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "Unauthorized request" })),
            )
                .into_response(),
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::new(NOT_FOUND_MESSAGE))).into_response()
            }
            AppError::Validation(message) | AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
            }
            AppError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new(SERVER_ERROR_MESSAGE)),
                )
                    .into_response();
                response.extensions_mut().insert(StorageFault(err.to_string()));
                response
            }
        }
    }
}
