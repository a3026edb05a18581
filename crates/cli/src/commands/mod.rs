//! CLI subcommands.

pub mod migrate;
pub mod send_otp;
