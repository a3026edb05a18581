//! Registration webhook handler.

use axum::{Json, body::Bytes, extract::State};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::Result;
use crate::services::registration;
use crate::state::AppState;

/// Success message returned once the customer is persisted.
pub const OTP_SENT_MESSAGE: &str = "OTP sent to your email";

/// Response body for a successful registration.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Register a user and send them an OTP.
///
/// The body is parsed by hand so that malformed JSON and missing fields map
/// onto the webhook's own 400 messages rather than extractor rejections.
#[instrument(skip_all)]
pub async fn register(State(state): State<AppState>, body: Bytes) -> Result<Json<MessageResponse>> {
    tracing::info!("Registration webhook invoked");

    let payload: Value = serde_json::from_slice(&body)?;
    registration::register(&payload, state.store(), state.notifier()).await?;

    Ok(Json(MessageResponse {
        message: OTP_SENT_MESSAGE,
    }))
}
