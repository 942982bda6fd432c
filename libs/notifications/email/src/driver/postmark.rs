//! Postmark driver

use super::{deliver, EmailDriver};
use crate::composition::compose;
use crate::config::DriverConfig;
use crate::error::EmailResult;
use crate::models::EmailMessage;
use crate::transport::{PostmarkTransport, SendResult, POSTMARK_API_URL};
use async_trait::async_trait;
use once_cell::sync::OnceCell;

/// Driver delivering through the Postmark HTTP API.
///
/// Reads `token` and `from.{name,email}` from its configuration, plus the
/// optional `endpoint` and `message_stream`.
pub struct PostmarkDriver {
    config: DriverConfig,
    message: EmailMessage,
    transport: OnceCell<PostmarkTransport>,
}

impl PostmarkDriver {
    pub const ALIAS: &'static str = "postmark";

    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            message: EmailMessage::new(),
            transport: OnceCell::new(),
        }
    }

    /// Transport built from the stored token, created on first use.
    fn transport(&self) -> EmailResult<&PostmarkTransport> {
        self.transport.get_or_try_init(|| -> EmailResult<PostmarkTransport> {
            let token = self.config.require_str("token")?;
            let endpoint = self.config.get_str("endpoint").unwrap_or(POSTMARK_API_URL);

            let mut transport = PostmarkTransport::with_endpoint(token, endpoint);
            if let Some(stream) = self.config.get_str("message_stream") {
                transport = transport.with_message_stream(stream);
            }
            Ok(transport)
        })
    }
}

#[async_trait]
impl EmailDriver for PostmarkDriver {
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
        let transport = self.transport()?;
        deliver(transport, &email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CompositionError, EmailError};

    fn config() -> DriverConfig {
        DriverConfig::for_driver("postmark")
            .with("token", "server-token")
            .with("endpoint", "http://127.0.0.1:9")
            .with_sender("Support", "support@example.com")
    }

    #[test]
    fn test_transport_created_once() {
        let driver = PostmarkDriver::new(config());
        assert!(driver.transport.get().is_none());

        let first = driver.transport().unwrap() as *const PostmarkTransport;
        let second = driver.transport().unwrap() as *const PostmarkTransport;
        assert!(std::ptr::eq(first, second));
        assert_eq!(driver.transport().unwrap().endpoint(), "http://127.0.0.1:9");
    }

    #[test]
    fn test_default_endpoint() {
        let driver = PostmarkDriver::new(DriverConfig::for_driver("postmark").with("token", "t"));
        assert_eq!(driver.transport().unwrap().endpoint(), POSTMARK_API_URL);
    }

    #[test]
    fn test_missing_token() {
        let driver = PostmarkDriver::new(DriverConfig::for_driver("postmark"));
        let err = driver.transport().err().unwrap();
        assert!(matches!(err, EmailError::Configuration { ref key } if key == "token"));
    }

    #[tokio::test]
    async fn test_send_without_recipient_skips_transport() {
        let mut driver = PostmarkDriver::new(config());
        driver.message_mut().set_text("hello");

        let err = driver.send().await.unwrap_err();
        assert!(matches!(
            err,
            EmailError::Composition(CompositionError::MissingRecipient)
        ));
        assert!(driver.transport.get().is_none());
    }

    #[tokio::test]
    async fn test_send_without_content() {
        let mut driver = PostmarkDriver::new(config());
        driver.message_mut().set_to("user@example.com");

        let err = driver.send().await.unwrap_err();
        assert!(matches!(
            err,
            EmailError::Composition(CompositionError::MissingContent)
        ));
    }

    #[test]
    fn test_keeps_own_config_copy() {
        let original = config();
        let driver = PostmarkDriver::new(original.clone());
        assert_eq!(driver.config(), &original);
        assert_eq!(driver.name(), "postmark");
    }
}
