//! Global application error types and handlers.
//!
//! This module defines the error type returned by every API handler and maps
//! each variant onto an HTTP status and a JSON body, so that form errors,
//! missing records and upstream (node, kmd, indexer, sandbox) failures are
//! reported consistently.

use adapters::AdapterError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::forms::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Validation failed")]
    Validation(ValidationErrors),
    #[error("{0}")]
    Upstream(String),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(ValidationErrors::non_field(rejection.body_text()))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(_) | AppError::Adapter(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation(errors) => json!({ "errors": errors }),
            AppError::Database(err) => {
                tracing::error!(error = %err, "database failure");
                json!({ "error": "Internal server error" })
            }
            other => {
                if status.is_server_error() {
                    tracing::warn!(error = %other, "upstream failure");
                }
                json!({ "error": other.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}
