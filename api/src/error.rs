//! Unified error types for the feed API
//!
//! This module defines error types for each layer:
//! - `SourceError`: Failures talking to the content, profile and interaction services
//! - `AppError`: Request errors returned by HTTP handlers
//!
//! Feed assembly never surfaces `SourceError` to callers; a failed source is
//! recorded on the response as a partial result instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::ContentType;

/// Errors from an external collaborator (content source, profile or interaction service)
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("{content_type} source timed out after {timeout_ms}ms")]
    Timeout {
        content_type: ContentType,
        timeout_ms: u64,
    },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", Some(msg)),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
