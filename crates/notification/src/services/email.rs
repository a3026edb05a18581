//! Email delivery for one-time passcodes.
//!
//! Uses SMTP via lettre (STARTTLS, authenticated) with Askama templates for
//! the plain-text and HTML parts.

use askama::Template;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;

/// Subject line of every OTP email.
pub const OTP_SUBJECT: &str = "Your OTP for verification";

/// HTML template for the OTP email.
#[derive(Template)]
#[template(path = "email/otp.html")]
struct OtpEmailHtml<'a> {
    otp: &'a str,
}

/// Plain text template for the OTP email.
#[derive(Template)]
#[template(path = "email/otp.txt")]
struct OtpEmailText<'a> {
    otp: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Rendered bodies of an OTP email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEmailBody {
    pub text: String,
    pub html: String,
}

/// Render the plain-text and HTML parts for `otp`.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn render_otp_email(otp: &str) -> Result<OtpEmailBody, MailError> {
    Ok(OtpEmailBody {
        text: OtpEmailText { otp }.render()?,
        html: OtpEmailHtml { otp }.render()?,
    })
}

/// Hands an OTP to an email transport.
#[async_trait]
pub trait MailDelivery: Send + Sync {
    /// Deliver `otp` to `recipient`, returning whether it was accepted.
    ///
    /// Never fails past this boundary; errors are logged and reported as `false`.
    async fn deliver(&self, recipient: &str, otp: &str) -> bool;
}

/// SMTP mailer for OTP emails.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Create a new mailer from configuration.
    ///
    /// No connection is opened until the first message is sent.
    ///
    /// # Errors
    ///
    /// Returns error if the relay settings are invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Build the multipart OTP message without sending it.
    ///
    /// # Errors
    ///
    /// Returns error if an address is invalid or a template fails to render.
    pub fn build_otp_message(&self, to: &str, otp: &str) -> Result<Message, MailError> {
        let body = render_otp_email(otp)?;

        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| MailError::InvalidAddress(to.to_string()))?)
            .subject(OTP_SUBJECT)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(body.html),
                    ),
            )?;

        Ok(message)
    }

    /// Send the OTP email.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built or the relay rejects it.
    pub async fn send_otp(&self, to: &str, otp: &str) -> Result<(), MailError> {
        let message = self.build_otp_message(to, otp)?;
        self.mailer.send(message).await?;

        tracing::info!(to = %to, subject = OTP_SUBJECT, "Email sent successfully");
        Ok(())
    }
}

#[async_trait]
impl MailDelivery for SmtpMailer {
    async fn deliver(&self, recipient: &str, otp: &str) -> bool {
        match self.send_otp(recipient, otp).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(to = %recipient, error = %e, "Error sending email");
                false
            }
        }
    }
}
