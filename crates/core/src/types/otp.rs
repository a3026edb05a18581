//! One-time passcode type.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OtpCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// The input is not exactly six characters long.
    #[error("OTP must be exactly {expected} digits (got {actual})")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Length of the rejected input.
        actual: usize,
    },
    /// The input contains a non-digit character.
    #[error("OTP must contain only ASCII digits")]
    NonDigit,
    /// The input starts with a zero and therefore falls below the issuing range.
    #[error("OTP must not start with 0")]
    LeadingZero,
}

/// A six-digit one-time passcode.
///
/// Codes are drawn uniformly from `100000..=999999`, so every code is exactly
/// six digits with no leading zero. There is no uniqueness guarantee across
/// users and no generation state is kept.
///
/// ## Examples
///
/// ```
/// use otp_signup_core::{OtpCode, generate_otp};
///
/// let otp = generate_otp();
/// assert_eq!(otp.as_str().len(), 6);
///
/// assert!(OtpCode::parse("123456").is_ok());
/// assert!(OtpCode::parse("012345").is_err()); // below range
/// assert!(OtpCode::parse("12345").is_err());  // too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Number of digits in every code.
    pub const LENGTH: usize = 6;
    /// Smallest code that can be issued.
    pub const MIN: u32 = 100_000;
    /// Largest code that can be issued.
    pub const MAX: u32 = 999_999;

    /// Parse an `OtpCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not six ASCII digits in the issuing range.
    pub fn parse(s: &str) -> Result<Self, OtpError> {
        if s.len() != Self::LENGTH {
            return Err(OtpError::WrongLength {
                expected: Self::LENGTH,
                actual: s.len(),
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpError::NonDigit);
        }

        if s.starts_with('0') {
            return Err(OtpError::LeadingZero);
        }

        Ok(Self(s.to_owned()))
    }

    /// Wrap a rendered code drawn from the issuing range.
    const fn from_generated(value: String) -> Self {
        Self(value)
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `OtpCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Generate a fresh six-digit OTP.
///
/// Uses the thread-local generator from `rand`; each call is independent.
#[must_use]
pub fn generate_otp() -> OtpCode {
    let code: u32 = rand::rng().random_range(OtpCode::MIN..=OtpCode::MAX);
    OtpCode::from_generated(code.to_string())
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OtpCode {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for OtpCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with mysql feature)
#[cfg(feature = "mysql")]
impl sqlx::Type<sqlx::MySql> for OtpCode {
    fn type_info() -> sqlx::mysql::MySqlTypeInfo {
        <String as sqlx::Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &sqlx::mysql::MySqlTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::MySql>>::compatible(ty)
    }
}

#[cfg(feature = "mysql")]
impl sqlx::Encode<'_, sqlx::MySql> for OtpCode {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<u8>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::MySql>>::encode_by_ref(&self.0, buf)
    }
}
