//! Application state shared across handlers.

use std::sync::Arc;

use crate::services::MailDelivery;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; built once at startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    mailer: Arc<dyn MailDelivery>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(mailer: Arc<dyn MailDelivery>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { mailer }),
        }
    }

    /// Get a reference to the mail delivery capability.
    #[must_use]
    pub fn mailer(&self) -> &dyn MailDelivery {
        self.inner.mailer.as_ref()
    }
}
