//! OTP Signup notification service library.
//!
//! Receives `{email, otp}` from the registration webhook, renders a
//! plain-text/HTML message and hands it to an authenticated STARTTLS SMTP
//! relay. The caller learns only whether delivery succeeded.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
