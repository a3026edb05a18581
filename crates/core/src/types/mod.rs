//! Core types for OTP Signup.
//!
//! This module provides the data model that flows through a registration:
//! raw request, validated user, persisted record and notification payload.

pub mod notification;
pub mod otp;
pub mod user;

pub use notification::NotificationRequest;
pub use otp::{OtpCode, OtpError, generate_otp};
pub use user::{RegistrationRequest, UserRecord, ValidatedUser};
