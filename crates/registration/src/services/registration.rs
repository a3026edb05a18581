//! Registration workflow: validate, issue an OTP, persist, notify.
//!
//! ```text
//! RECEIVED --validate--> VALIDATED --persist--> PERSISTED --notify--> NOTIFIED
//!     |                      |
//!     +--> INVALID           +--> STORE_FAILED
//! ```
//!
//! Notification never starts before the insert has succeeded, and its outcome
//! never changes the result of a registration.

use serde_json::Value;
use thiserror::Error;

use otp_signup_core::{OtpCode, generate_otp, validate};

use crate::db::{CustomerStore, StoreError};
use crate::services::notifier::OtpNotifier;

/// Ways a registration can stop before the user is persisted.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// A required field is missing or falsy.
    #[error("Details are not correct")]
    InvalidDetails,

    /// The customer row could not be written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A completed registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    pub email: String,
    pub otp: OtpCode,
}

/// Run one registration for an already-parsed payload.
///
/// # Errors
///
/// Returns `RegistrationError::InvalidDetails` without touching the store or
/// the notifier, or `RegistrationError::Store` without calling the notifier.
pub async fn register(
    payload: &Value,
    store: &dyn CustomerStore,
    notifier: &dyn OtpNotifier,
) -> Result<Registered, RegistrationError> {
    let Some(user) = validate(payload) else {
        tracing::warn!("User validation failed");
        return Err(RegistrationError::InvalidDetails);
    };
    tracing::info!(email = %user.email(), "Registering user");

    let record = user.with_otp(generate_otp());
    store.persist(&record).await?;

    notifier.notify(&record.email, &record.otp).await;

    Ok(Registered {
        email: record.email,
        otp: record.otp,
    })
}
