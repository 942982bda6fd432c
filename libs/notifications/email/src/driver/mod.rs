//! Email drivers
//!
//! A driver holds its configuration and the message being composed, and
//! implements `send` on top of a [`Transport`]. Each delivery provider is one
//! driver type; the factory hands them out as `Box<dyn EmailDriver>`.

pub mod memory;
pub mod postmark;
pub mod smtp;

pub use memory::MemoryDriver;
pub use postmark::PostmarkDriver;
pub use smtp::SmtpDriver;

use crate::config::DriverConfig;
use crate::error::EmailResult;
use crate::models::{ComposedEmail, EmailMessage};
use crate::transport::{SendResult, Transport};
use async_trait::async_trait;
use tracing::info;

/// Capability shared by every driver.
#[async_trait]
pub trait EmailDriver: Send + Sync {
    /// Alias the driver is registered under
    fn name(&self) -> &'static str;

    /// Configuration the driver was built from
    fn config(&self) -> &DriverConfig;

    fn message(&self) -> &EmailMessage;

    fn message_mut(&mut self) -> &mut EmailMessage;

    /// Validate the message and deliver it.
    ///
    /// Fails with a composition error when the recipient or both bodies are
    /// missing. Transport errors are returned unchanged. Calling `send` again
    /// delivers again.
    async fn send(&self) -> EmailResult<SendResult>;
}

/// Chainable message accessors for any driver.
impl dyn EmailDriver {
    pub fn to(&self) -> &str {
        self.message().to()
    }

    pub fn set_to(&mut self, to: impl Into<String>) -> &mut Self {
        self.message_mut().set_to(to);
        self
    }

    pub fn subject(&self) -> Option<&str> {
        self.message().subject()
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.message_mut().set_subject(subject);
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.message().text()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.message_mut().set_text(text);
        self
    }

    pub fn html(&self) -> Option<&str> {
        self.message().html()
    }

    pub fn set_html(&mut self, html: impl Into<String>) -> &mut Self {
        self.message_mut().set_html(html);
        self
    }

    /// Replace the whole message at once
    pub fn set_message(&mut self, message: EmailMessage) -> &mut Self {
        *self.message_mut() = message;
        self
    }
}

/// Hand a composed email to the transport. Errors pass through untouched.
pub(crate) async fn deliver<T>(transport: &T, email: &ComposedEmail) -> EmailResult<SendResult>
where
    T: Transport + ?Sized,
{
    let result = transport.deliver(email).await?;

    info!(
        transport = transport.name(),
        to = %email.to,
        message_id = %result.message_id,
        "Email sent"
    );

    Ok(result)
}
