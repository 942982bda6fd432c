//! In-memory driver

use super::{deliver, EmailDriver};
use crate::composition::compose;
use crate::config::DriverConfig;
use crate::error::EmailResult;
use crate::models::EmailMessage;
use crate::transport::{MemoryTransport, SendResult};
use async_trait::async_trait;

/// Driver that delivers into a [`MemoryTransport`] outbox.
///
/// Applies the same composition rules as the network drivers, which makes it
/// the driver of choice for local development and tests.
pub struct MemoryDriver {
    config: DriverConfig,
    message: EmailMessage,
    transport: MemoryTransport,
}

impl MemoryDriver {
    pub const ALIAS: &'static str = "memory";

    pub fn new(config: DriverConfig, transport: MemoryTransport) -> Self {
        Self {
            config,
            message: EmailMessage::new(),
            transport,
        }
    }

    pub fn transport(&self) -> &MemoryTransport {
        &self.transport
    }
}

#[async_trait]
impl EmailDriver for MemoryDriver {
    fn name(&self) -> &'static str {
        Self::ALIAS
    }

    fn config(&self) -> &DriverConfig {
        &self.config
    }

    fn message(&self) -> &EmailMessage {
        &self.message
    }

    fn message_mut(&mut self) -> &mut EmailMessage {
        &mut self.message
    }

    async fn send(&self) -> EmailResult<SendResult> {
        let email = compose(&self.message, &self.config)?;
        deliver(&self.transport, &email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Body;

    fn driver(transport: MemoryTransport) -> MemoryDriver {
        MemoryDriver::new(
            DriverConfig::for_driver("memory").with_sender("Support", "support@example.com"),
            transport,
        )
    }

    #[tokio::test]
    async fn test_send_records_composed_email() {
        let outbox = MemoryTransport::new();
        let mut driver = driver(outbox.clone());
        driver
            .message_mut()
            .set_to("user@example.com")
            .set_text("plain");

        driver.send().await.unwrap();

        let sent = outbox.sent_emails().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Message from Support");
        assert_eq!(sent[0].body, Body::Text("plain".to_string()));
    }

    #[tokio::test]
    async fn test_composition_error_does_not_reach_transport() {
        let outbox = MemoryTransport::new();
        let driver = driver(outbox.clone());

        assert!(driver.send().await.unwrap_err().is_composition());
        assert_eq!(outbox.sent_count().await, 0);
    }

    #[tokio::test]
    async fn test_transport_error_is_returned() {
        let mut driver = driver(MemoryTransport::failing("outbox closed"));
        driver.message_mut().set_to("user@example.com").set_html("<p>x</p>");

        let err = driver.send().await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "Transport unavailable: outbox closed");
    }
}
