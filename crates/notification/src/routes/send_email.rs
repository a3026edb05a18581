//! OTP email handler.

use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;
use tracing::instrument;

use otp_signup_core::truthy_text;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Success message returned once the transport accepts the email.
pub const EMAIL_SENT_MESSAGE: &str = "Email sent successfully";

/// Deliver an OTP email.
///
/// Expects `{"email": ..., "otp": ...}`; both must be present and non-empty.
/// Delivery is attempted once.
#[instrument(skip_all)]
pub async fn send_email(State(state): State<AppState>, body: Bytes) -> Result<Json<&'static str>> {
    tracing::info!("Notification request received");

    let payload: Value = serde_json::from_slice(&body)?;

    let recipient = payload.get("email").and_then(truthy_text);
    let otp = payload.get("otp").and_then(truthy_text);
    let (Some(recipient), Some(otp)) = (recipient, otp) else {
        return Err(AppError::MissingFields);
    };

    tracing::info!(to = %recipient, "Attempting to send email");

    if !state.mailer().deliver(&recipient, &otp).await {
        return Err(AppError::DeliveryFailed);
    }

    tracing::info!(to = %recipient, "Email sent successfully");
    Ok(Json(EMAIL_SENT_MESSAGE))
}
