//! Transport collaborators that perform the actual delivery

pub mod memory;
pub mod postmark;
pub mod smtp;

pub use memory::MemoryTransport;
pub use postmark::{PostmarkTransport, POSTMARK_API_URL};
pub use smtp::{SmtpSettings, SmtpTransport};

use crate::error::TransportError;
use crate::models::ComposedEmail;
use async_trait::async_trait;

/// Result of sending an email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResult {
    /// Provider-specific message ID
    pub message_id: String,
}

/// Trait for delivery transports
///
/// A transport is invoked exactly once per `send` and owns no retry policy.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver a composed email
    async fn deliver(&self, email: &ComposedEmail) -> Result<SendResult, TransportError>;

    /// Get transport name
    fn name(&self) -> &'static str;
}
