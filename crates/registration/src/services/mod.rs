//! Business services for the registration webhook.

pub mod notifier;
pub mod registration;

pub use notifier::{HttpNotifier, NotifyError, OtpNotifier};
pub use registration::{Registered, RegistrationError, register};
