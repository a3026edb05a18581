//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::CustomerStore;
use crate::services::OtpNotifier;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything in it is built once
/// at startup from the configuration and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn CustomerStore>,
    notifier: Arc<dyn OtpNotifier>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `store` - Customer storage
    /// * `notifier` - Notification service client
    #[must_use]
    pub fn new(store: Arc<dyn CustomerStore>, notifier: Arc<dyn OtpNotifier>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, notifier }),
        }
    }

    /// Get a reference to the customer store.
    #[must_use]
    pub fn store(&self) -> &dyn CustomerStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the notification client.
    #[must_use]
    pub fn notifier(&self) -> &dyn OtpNotifier {
        self.inner.notifier.as_ref()
    }
}
