//! Unified error handling with Sentry integration.
//!
//! All route handlers return `Result<T, AdminError>`. Errors reach the
//! client as JSON `{"message", "code"}` with an HTTP status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::payments::PaymentsError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Payment service operation failed.
    #[error("Payment service error: {0}")]
    Payments(#[from] PaymentsError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Admin is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Session token exists but has expired.
    #[error("Session expired")]
    TokenExpired,

    /// Admin is authenticated but lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body sent to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: &'static str,
}

impl AdminError {
    /// Stable string code for the client.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Payments(PaymentsError::NotFound(_)) => "NOT_FOUND",
            Self::Payments(PaymentsError::RateLimited(_)) => "RATE_LIMITED",
            Self::Payments(_) => "UPSTREAM_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Internal(_) | Self::Payments(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Payments(err) => match err {
                PaymentsError::NotFound(_) => StatusCode::NOT_FOUND,
                PaymentsError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) | Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Payments(err) => match err {
                PaymentsError::NotFound(what) => format!("Not found: {what}"),
                PaymentsError::RateLimited(_) => "Rate limited".to_string(),
                _ => "Payment service error".to_string(),
            },
            _ => self.to_string(),
        };

        let code = self.code();
        (status, Json(ErrorBody { message, code })).into_response()
    }
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;
