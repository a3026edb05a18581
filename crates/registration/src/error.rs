//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Server errors are captured to
//! Sentry and logged with a reference id; the client only sees that id, never
//! the driver message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::services::RegistrationError;

/// Application-level error type for the registration webhook.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body is not valid JSON.
    #[error("Invalid JSON in request body")]
    MalformedJson(#[from] serde_json::Error),

    /// Registration workflow failed.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::MalformedJson(ref err) => {
                tracing::warn!(error = %err, "Failed to parse request body as JSON");
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            Self::Registration(RegistrationError::InvalidDetails) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            Self::Registration(RegistrationError::Store(_)) => {
                let reference = Uuid::new_v4();
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    reference = %reference,
                    sentry_event_id = %event_id,
                    "Request error"
                );

                // Don't expose driver details to clients
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: internal failure (reference {reference})"),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use crate::db::StoreError;

    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_details_response() {
        let response = AppError::from(RegistrationError::InvalidDetails).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Details are not correct");
    }

    #[tokio::test]
    async fn test_malformed_json_response() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid JSON in request body");
    }

    #[tokio::test]
    async fn test_store_error_hides_driver_detail() {
        let err = RegistrationError::Store(StoreError::Database(sqlx::Error::Protocol(
            "Table 'webhook.Customer' doesn't exist".to_string(),
        )));
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_text(response).await;
        assert!(body.starts_with("Database error: internal failure (reference "));
        assert!(!body.contains("Customer"));
    }
}
