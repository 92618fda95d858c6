/*
 * Responsibility
 * - Application-wide ApiError definition
 * - IntoResponse (HTTP status / JSON error body)
 * - Uniform conversion of repo / gateway / validation / auth failures
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::notes::NoteError;

/// Message returned for every authentication failure. Verification details stay in the logs.
pub const UNAUTHORIZED_MESSAGE: &str = "無效的憑證";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("note store not configured")]
    GatewayUnavailable,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                UNAUTHORIZED_MESSAGE.to_string(),
            ),
            AppError::Validation(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", message)
            }
            AppError::GatewayUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GATEWAY_UNAVAILABLE",
                "note store not configured".into(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "note store call failed");
        AppError::Internal
    }
}

impl From<NoteError> for AppError {
    fn from(e: NoteError) -> Self {
        match e {
            NoteError::Unavailable => AppError::GatewayUnavailable,
            NoteError::Store(e) => e.into(),
        }
    }
}

// Every body rejection (bad syntax, wrong content type, schema mismatch) is a 422.
impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}
