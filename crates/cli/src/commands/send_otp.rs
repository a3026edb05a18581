//! Manual notification command.
//!
//! Sends the same request the registration webhook sends after a successful
//! insert, which makes it useful for checking SMTP settings end to end.
//!
//! # Environment Variables
//!
//! - `EMAIL_FUNCTION_URL` - Notification service endpoint (required)
//! - `NOTIFY_TIMEOUT_SECS` - Request timeout (default: 10)

use thiserror::Error;

use otp_signup_core::{NotificationRequest, OtpCode, OtpError, generate_otp};
use otp_signup_registration::config::{ConfigError, NotifierConfig};
use otp_signup_registration::services::{HttpNotifier, NotifyError};

/// Errors that can occur while sending a test notification.
#[derive(Debug, Error)]
pub enum SendOtpError {
    /// Notifier settings are missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The supplied code is not a six-digit OTP.
    #[error("Invalid OTP: {0}")]
    InvalidOtp(#[from] OtpError),

    /// The notification service could not be reached or refused the request.
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Resolve the code to send: parse `otp` if given, otherwise generate one.
///
/// # Errors
///
/// Returns `SendOtpError::InvalidOtp` if `otp` is not six digits.
pub fn resolve_otp(otp: Option<&str>) -> Result<OtpCode, SendOtpError> {
    match otp {
        Some(code) => Ok(OtpCode::parse(code)?),
        None => Ok(generate_otp()),
    }
}

/// Send one OTP notification to `email`.
///
/// Unlike the webhook, failures are reported instead of absorbed.
///
/// # Errors
///
/// Returns error if configuration is missing, the OTP is invalid, or the
/// notification service fails.
pub async fn run(email: &str, otp: Option<&str>) -> Result<(), SendOtpError> {
    let otp = resolve_otp(otp)?;
    let config = NotifierConfig::from_env()?;
    let notifier = HttpNotifier::new(&config)?;

    tracing::info!(to = %email, endpoint = %notifier.endpoint(), "Sending OTP...");
    let response = notifier
        .send(&NotificationRequest::new(email, otp.as_str()))
        .await?;

    tracing::info!(to = %email, otp = %otp, response = %response, "Notification accepted");
    Ok(())
}
