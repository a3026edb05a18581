//! Customer storage for the registration webhook.
//!
//! # Database: `webhook` (`MySQL`)
//!
//! ## Tables
//!
//! - `Customer` - One row per successful registration (`name`, `email`,
//!   `password`, `otp`). Rows are never updated or deleted here.
//!
//! The service performs no migrations and no table-existence checks. Create
//! the table with:
//! ```bash
//! cargo run -p otp-signup-cli -- migrate
//! ```

pub mod customers;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use thiserror::Error;

use otp_signup_core::UserRecord;

use crate::config::DatabaseConfig;

pub use customers::MySqlCustomerStore;

/// Errors that can occur while persisting a customer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No connection could be obtained (refused, timed out, bad credentials).
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Constraint violation (e.g., a unique index on email).
    #[error("constraint violation: {0}")]
    Conflict(#[source] sqlx::Error),

    /// Any other failure while executing the statement.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    /// Classify an error raised by the insert statement.
    pub(crate) fn from_insert(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && (db_err.is_unique_violation()
                || db_err.is_foreign_key_violation()
                || db_err.is_check_violation())
        {
            return Self::Conflict(err);
        }
        Self::Database(err)
    }
}

/// Durable storage for registered customers.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert one customer row as a single auto-committed statement.
    ///
    /// Implementations must release any connection they hold on every exit
    /// path, and must not retry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` carrying the underlying cause.
    async fn persist(&self, record: &UserRecord) -> Result<(), StoreError>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if no connection can be made.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Create a `MySQL` connection pool for the customer schema.
///
/// The pool connects lazily, so the service starts even when the database is
/// down; each registration then fails with `StoreError::Connection`.
#[must_use]
pub fn create_pool(config: &DatabaseConfig) -> MySqlPool {
    MySqlPoolOptions::new()
        .max_connections(10)
        .min_connections(0)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy_with(config.connect_options())
}
