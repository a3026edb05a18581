//! OTP Signup registration webhook library.
//!
//! Validates an inbound registration, issues a six-digit OTP, writes the
//! customer row and asks the notification service to email the code. The
//! binary in `main.rs` wires these pieces to real `MySQL` and HTTP backends;
//! tests wire them to in-memory fakes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
