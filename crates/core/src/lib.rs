//! OTP Signup Core - Shared domain library.
//!
//! This crate provides the pieces shared by both deployable units:
//! - `registration` - Registration webhook (validate, persist, notify)
//! - `notification` - Notification service (deliver the OTP by email)
//! - `cli` - Operator tooling
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no database access,
//! no HTTP clients, no SMTP. This keeps it lightweight and lets both services
//! agree on the wire format without depending on each other.
//!
//! # Modules
//!
//! - [`types`] - Registration payloads, user records, OTP codes and the
//!   notification wire request
//! - [`validation`] - Required-field validation with JSON truthiness rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{truthy_text, validate};
