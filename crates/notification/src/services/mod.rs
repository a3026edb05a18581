//! Business services for the notification service.

pub mod email;

pub use email::{MailDelivery, MailError, SmtpMailer, render_otp_email};
