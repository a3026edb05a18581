//! Integration test harness for OTP Signup.
//!
//! Runs the registration webhook and the notification service on loopback
//! sockets, wired together over real HTTP, with an in-memory customer store
//! and a recording mailer standing in for `MySQL` and SMTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p otp-signup-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;

use otp_signup_core::{RegistrationRequest, UserRecord};
use otp_signup_notification::{
    routes as notification_routes, services::MailDelivery, state::AppState as NotificationState,
};
use otp_signup_registration::{
    config::RegistrationConfig,
    db::{CustomerStore, StoreError},
    routes as registration_routes,
    services::HttpNotifier,
    state::AppState as RegistrationState,
};

/// Boxed error for harness setup failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Customer store that keeps rows in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<UserRecord>>,
    unavailable: bool,
}

impl MemoryStore {
    /// A store whose every call fails with a connection error.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Rows persisted so far.
    #[must_use]
    pub fn rows(&self) -> Vec<UserRecord> {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn persist(&self, record: &UserRecord) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Connection(sqlx::Error::PoolTimedOut));
        }
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Connection(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// Mailer that records `(recipient, otp)` pairs instead of sending them.
#[derive(Debug)]
pub struct RecordingMailer {
    accept: bool,
    delivered: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    /// A mailer whose transport accepts (`true`) or refuses every message.
    #[must_use]
    pub const fn new(accept: bool) -> Self {
        Self {
            accept,
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Deliveries attempted so far.
    #[must_use]
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MailDelivery for RecordingMailer {
    async fn deliver(&self, recipient: &str, otp: &str) -> bool {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((recipient.to_string(), otp.to_string()));
        self.accept
    }
}

/// Serve `app` on an ephemeral loopback port.
///
/// # Errors
///
/// Returns error if the listener cannot be bound.
pub async fn spawn(app: Router) -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(addr)
}

fn registration_config(email_function_url: &str) -> Result<RegistrationConfig, BoxError> {
    Ok(RegistrationConfig::from_vars(|key| match key {
        "DB_HOST" => Some("localhost".to_string()),
        "DB_USER" => Some("webhook".to_string()),
        "DB_PASSWORD" => Some("test-password".to_string()),
        "EMAIL_FUNCTION_URL" => Some(email_function_url.to_string()),
        "NOTIFY_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })?)
}

/// Both services running on loopback.
pub struct TestStack {
    pub client: reqwest::Client,
    pub registration_url: String,
    pub notification_url: String,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestStack {
    /// Start the notification service, then a registration webhook pointed at it.
    ///
    /// # Errors
    ///
    /// Returns error if a server cannot be started.
    pub async fn start(store: MemoryStore, mailer: RecordingMailer) -> Result<Self, BoxError> {
        let store = Arc::new(store);
        let mailer = Arc::new(mailer);

        let notification_state = NotificationState::new(mailer.clone());
        let notification_addr = spawn(notification_routes::router(notification_state)).await?;
        let notification_url = format!("http://{notification_addr}");

        let registration_url =
            Self::start_registration(store.clone(), &format!("{notification_url}/send-email"))
                .await?;

        Ok(Self {
            client: reqwest::Client::new(),
            registration_url,
            notification_url,
            store,
            mailer,
        })
    }

    /// Start only a registration webhook whose notifier targets `email_function_url`.
    ///
    /// Returns the webhook's base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the server cannot start.
    pub async fn start_registration(
        store: Arc<MemoryStore>,
        email_function_url: &str,
    ) -> Result<String, BoxError> {
        let config = registration_config(email_function_url)?;
        let notifier = HttpNotifier::new(&config.notifier)?;
        let state = RegistrationState::new(store, Arc::new(notifier));

        let addr = spawn(registration_routes::router(state)).await?;
        Ok(format!("http://{addr}"))
    }

    /// POST a well-formed registration to the webhook.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be sent.
    pub async fn register_user(
        &self,
        request: &RegistrationRequest,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(format!("{}/register", self.registration_url))
            .json(request)
            .send()
            .await
    }

    /// POST a raw body to the registration webhook.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be sent.
    pub async fn register(&self, body: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(format!("{}/register", self.registration_url))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
    }
}
