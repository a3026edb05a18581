//! Client for the notification service.
//!
//! Delivery of the OTP email is best effort: [`OtpNotifier::notify`] logs
//! every failure and never reports it back to the registration flow.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use otp_signup_core::{NotificationRequest, OtpCode};

use crate::config::NotifierConfig;

/// Errors that can occur when calling the notification service.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed (connection refused, timeout, unreadable body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The notification service answered with a non-success status.
    #[error("notification service returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Sends an issued OTP to the user.
#[async_trait]
pub trait OtpNotifier: Send + Sync {
    /// Deliver `otp` to `email`. Failures are absorbed.
    async fn notify(&self, email: &str, otp: &OtpCode);
}

/// Notifier that POSTs `{email, otp}` to the notification service.
#[derive(Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpNotifier {
    /// Create a new notifier from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &NotifierConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The configured notification endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one notification request and return the response body.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Http` on transport failure and
    /// `NotifyError::Rejected` if the service answers with a non-2xx status.
    pub async fn send(&self, request: &NotificationRequest) -> Result<String, NotifyError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl OtpNotifier for HttpNotifier {
    async fn notify(&self, email: &str, otp: &OtpCode) {
        tracing::info!(email = %email, "Sending OTP");

        let request = NotificationRequest::new(email, otp.as_str());
        match self.send(&request).await {
            Ok(body) => tracing::info!(email = %email, response = %body, "OTP sent"),
            Err(NotifyError::Rejected { status, body }) => tracing::warn!(
                email = %email,
                status,
                response = %body,
                "Notification service rejected OTP"
            ),
            Err(e) => tracing::error!(email = %email, error = %e, "Error sending OTP"),
        }
    }
}
