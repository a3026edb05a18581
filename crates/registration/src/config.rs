//! Registration service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DB_HOST` - `MySQL` server hostname
//! - `DB_USER` - `MySQL` username
//! - `DB_PASSWORD` - `MySQL` password
//! - `EMAIL_FUNCTION_URL` - Notification service endpoint that receives `{email, otp}`
//!
//! ## Optional
//! - `DB_PORT` - `MySQL` port (default: 3306)
//! - `NOTIFY_TIMEOUT_SECS` - Timeout for the notification call, at least 1 (default: 10)
//! - `REGISTRATION_HOST` - Bind address (default: 127.0.0.1)
//! - `REGISTRATION_PORT` - Listen port (default: 8080)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! The database name is fixed to [`DATABASE_NAME`].

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::mysql::MySqlConnectOptions;
use thiserror::Error;
use url::Url;

/// Schema every registration is written to.
pub const DATABASE_NAME: &str = "webhook";

const DEFAULT_DB_PORT: &str = "3306";
const DEFAULT_NOTIFY_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Registration service configuration.
#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Customer database connection settings
    pub database: DatabaseConfig,
    /// Notification service client settings
    pub notifier: NotifierConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
}

/// `MySQL` connection settings.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &DATABASE_NAME)
            .finish()
    }
}

impl DatabaseConfig {
    /// Connection options for the fixed registration schema.
    #[must_use]
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(DATABASE_NAME)
    }
}

/// Notification service client settings.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Endpoint receiving `POST {email, otp}`
    pub endpoint: Url,
    /// Upper bound on a single notification request
    pub timeout: Duration,
}

impl RegistrationConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(lookup);

        Ok(Self {
            host: vars.parsed("REGISTRATION_HOST", "127.0.0.1")?,
            port: vars.parsed("REGISTRATION_PORT", "8080")?,
            database: DatabaseConfig::load(&vars)?,
            notifier: NotifierConfig::load(&vars)?,
            sentry_dsn: vars.optional("SENTRY_DSN"),
            sentry_environment: vars.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseConfig {
    /// Load only the database settings (`DB_*`) from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a `DB_*` variable is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(&Vars(|key: &str| std::env::var(key).ok()))
    }

    fn load<F: Fn(&str) -> Option<String>>(vars: &Vars<F>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: vars.required("DB_HOST")?,
            port: vars.parsed("DB_PORT", DEFAULT_DB_PORT)?,
            user: vars.required("DB_USER")?,
            password: SecretString::from(vars.required("DB_PASSWORD")?),
        })
    }
}

impl NotifierConfig {
    /// Load only the notification client settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `EMAIL_FUNCTION_URL` is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(&Vars(|key: &str| std::env::var(key).ok()))
    }

    fn load<F: Fn(&str) -> Option<String>>(vars: &Vars<F>) -> Result<Self, ConfigError> {
        let endpoint = vars.required("EMAIL_FUNCTION_URL")?;
        let endpoint = Url::parse(&endpoint).map_err(|e| {
            ConfigError::InvalidEnvVar("EMAIL_FUNCTION_URL".to_string(), e.to_string())
        })?;
        let timeout_secs: u64 = vars.parsed("NOTIFY_TIMEOUT_SECS", DEFAULT_NOTIFY_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "NOTIFY_TIMEOUT_SECS".to_string(),
                "must be at least 1 second".to_string(),
            ));
        }

        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    /// Get a required variable; empty values count as missing.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key)
            .as_deref()
            .unwrap_or(default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DB_HOST", "db.internal"),
            ("DB_USER", "webhook"),
            ("DB_PASSWORD", "s3cr3t-db-pass"),
            ("EMAIL_FUNCTION_URL", "http://notify.internal/send-email"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<RegistrationConfig, ConfigError> {
        RegistrationConfig::from_vars(|key| vars.get(key).map(|v| (*v).to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = load(&base_vars()).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.notifier.timeout, Duration::from_secs(10));
        assert_eq!(
            config.notifier.endpoint.as_str(),
            "http://notify.internal/send-email"
        );
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let mut vars = base_vars();
        vars.insert("DB_PORT", "3307");
        vars.insert("NOTIFY_TIMEOUT_SECS", "3");
        vars.insert("REGISTRATION_HOST", "0.0.0.0");
        vars.insert("REGISTRATION_PORT", "9000");

        let config = load(&vars).unwrap();
        assert_eq!(config.database.port, 3307);
        assert_eq!(config.notifier.timeout, Duration::from_secs(3));
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
    }

    #[test]
    fn test_missing_required_vars() {
        for key in ["DB_HOST", "DB_USER", "DB_PASSWORD", "EMAIL_FUNCTION_URL"] {
            let mut vars = base_vars();
            vars.remove(key);
            let err = load(&vars).unwrap_err();
            assert!(
                matches!(&err, ConfigError::MissingEnvVar(k) if k == key),
                "unexpected error for {key}: {err}"
            );
        }
    }

    #[test]
    fn test_empty_required_var_is_missing() {
        let mut vars = base_vars();
        vars.insert("DB_HOST", "");
        assert!(matches!(load(&vars), Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = base_vars();
        vars.insert("EMAIL_FUNCTION_URL", "not a url");
        assert!(matches!(load(&vars), Err(ConfigError::InvalidEnvVar(k, _)) if k == "EMAIL_FUNCTION_URL"));

        let mut vars = base_vars();
        vars.insert("DB_PORT", "mysql");
        assert!(matches!(load(&vars), Err(ConfigError::InvalidEnvVar(k, _)) if k == "DB_PORT"));
    }

    #[test]
    fn test_zero_notify_timeout_is_rejected() {
        let mut vars = base_vars();
        vars.insert("NOTIFY_TIMEOUT_SECS", "0");
        assert!(
            matches!(load(&vars), Err(ConfigError::InvalidEnvVar(k, _)) if k == "NOTIFY_TIMEOUT_SECS")
        );

        vars.insert("NOTIFY_TIMEOUT_SECS", "1");
        assert_eq!(load(&vars).unwrap().notifier.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_database_config_debug_redacts_password() {
        let config = load(&base_vars()).unwrap();
        let debug_output = format!("{:?}", config.database);

        assert!(debug_output.contains("db.internal"));
        assert!(debug_output.contains(DATABASE_NAME));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("s3cr3t-db-pass"));
    }
}
