//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! otp-signup migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DB_HOST`, `DB_USER`, `DB_PASSWORD` - `MySQL` connection (required)
//! - `DB_PORT` - `MySQL` port (default: 3306)
//!
//! The `webhook` schema must already exist; migrations create the tables
//! inside it.
//!
//! # Migration Files
//!
//! `crates/cli/migrations/`, embedded at compile time.

use sqlx::MySqlPool;
use thiserror::Error;

use otp_signup_registration::config::{ConfigError, DATABASE_NAME, DatabaseConfig};

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Database settings are missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply pending migrations to the registration database.
///
/// # Errors
///
/// Returns error if configuration is missing, the database is unreachable,
/// or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = DatabaseConfig::from_env()?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        database = DATABASE_NAME,
        "Connecting to database..."
    );
    let pool = MySqlPool::connect_with(config.connect_options()).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    pool.close().await;
    tracing::info!("Migrations complete!");
    Ok(())
}
