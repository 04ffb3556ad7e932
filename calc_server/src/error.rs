//! Error types for the estimator server

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use calc_core::errors::CalcError;

use crate::email::EmailError;

/// Message returned for any failure the client cannot fix
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing your request";

/// Message returned when the email provider cannot be reached
pub const EMAIL_UNAVAILABLE_MESSAGE: &str = "Email service unavailable";

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    Validation(CalcError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Email delivery failed: {0}")]
    Email(#[from] EmailError),

    #[error("Render timeout after {0}ms")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl From<CalcError> for ServerError {
    fn from(err: CalcError) -> Self {
        if err.is_validation_error() {
            ServerError::Validation(err)
        } else {
            ServerError::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::Validation(err) => {
                (StatusCode::BAD_REQUEST, err.error_code(), err.to_string())
            }
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::Email(EmailError::InvalidRecipient(address)) => (
                StatusCode::BAD_REQUEST,
                "INVALID_EMAIL",
                format!("Invalid email address: {}", address),
            ),
            ServerError::Email(EmailError::Provider { status, message }) => {
                tracing::warn!(provider_status = *status, "Email provider rejected send: {}", message);
                (StatusCode::BAD_GATEWAY, "EMAIL_FAILED", message.clone())
            }
            ServerError::Email(err) => {
                tracing::warn!("Email delivery failed: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "EMAIL_FAILED",
                    EMAIL_UNAVAILABLE_MESSAGE.to_string(),
                )
            }
            ServerError::Timeout(ms) => (
                StatusCode::GATEWAY_TIMEOUT,
                "TIMEOUT",
                format!("Report rendering timed out after {}ms", ms),
            ),
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    GENERIC_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code,
        };

        (status, Json(body)).into_response()
    }
}

/// Response for a handler panic, used by the catch-panic middleware
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    };
    ServerError::Internal(format!("handler panicked: {}", detail)).into_response()
}
