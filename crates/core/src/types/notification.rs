//! Wire payload for the notification service.

use serde::{Deserialize, Serialize};

/// Request body sent from the registration webhook to the notification service.
///
/// `otp` is a plain string on the wire; the notification service only requires
/// it to be present and non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRequest {
    pub email: String,
    pub otp: String,
}

impl NotificationRequest {
    #[must_use]
    pub fn new(email: impl Into<String>, otp: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            otp: otp.into(),
        }
    }
}
