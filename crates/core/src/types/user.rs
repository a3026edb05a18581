//! Registration payload and user record types.

use serde::{Deserialize, Serialize};

use super::otp::OtpCode;

/// Registration payload as a client sends it.
///
/// The webhook never deserializes into this type directly: inbound bodies are
/// parsed as loose JSON and checked with [`crate::validate`], so that missing
/// and falsy fields are both reported as a validation failure. Callers such
/// as the end-to-end test harness use it to build well-formed requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A user whose three required fields are present and truthy.
///
/// Only [`crate::validate`] constructs this type.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedUser {
    name: String,
    email: String,
    password: String,
}

impl ValidatedUser {
    pub(crate) const fn new(name: String, email: String, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Attach an OTP, producing the row to persist.
    #[must_use]
    pub fn with_otp(self, otp: OtpCode) -> UserRecord {
        UserRecord {
            name: self.name,
            email: self.email,
            password: self.password,
            otp,
        }
    }
}

impl std::fmt::Debug for ValidatedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A row of the `Customer` relation.
///
/// Created once per successful registration and never updated.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub otp: OtpCode,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("otp", &self.otp)
            .finish()
    }
}
