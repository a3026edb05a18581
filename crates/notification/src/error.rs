//! Unified error handling with Sentry integration.
//!
//! Every response body from this service is a JSON-encoded string, for
//! failures as well as for success.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error type for the notification service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body is not valid JSON.
    #[error("Invalid JSON in request body")]
    MalformedJson(#[from] serde_json::Error),

    /// `email` or `otp` is missing or empty.
    #[error("Email and OTP are required")]
    MissingFields,

    /// The mail transport did not accept the message.
    #[error("Failed to send email")]
    DeliveryFailed,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MalformedJson(err) => {
                tracing::error!(error = %err, "Failed to parse event body as JSON");
                StatusCode::BAD_REQUEST
            }
            Self::MissingFields => {
                tracing::warn!("Missing email or OTP in payload");
                StatusCode::BAD_REQUEST
            }
            Self::DeliveryFailed => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(sentry_event_id = %event_id, "Failed to send email");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(self.to_string())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
