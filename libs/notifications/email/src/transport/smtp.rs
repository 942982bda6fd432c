//! SMTP transport using lettre

use super::{SendResult, Transport};
use crate::error::TransportError;
use crate::models::{Body, ComposedEmail};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

/// Default submission port
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP connection settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub use_tls: bool,
}

impl SmtpSettings {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
            use_tls: true,
        }
    }

    fn credentials(&self) -> Option<Credentials> {
        self.username
            .as_ref()
            .filter(|u| !u.is_empty())
            .map(|u| Credentials::new(u.clone(), self.password.clone().unwrap_or_default()))
    }
}

/// SMTP transport
pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    /// Create a new SMTP transport
    pub fn new(settings: &SmtpSettings) -> Result<Self, TransportError> {
        let mut builder = if settings.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            // Plain connection, for Mailpit/Mailhog style local relays
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };

        builder = builder.port(settings.port);
        if let Some(creds) = settings.credentials() {
            builder = builder.credentials(creds);
        }

        Ok(Self {
            transport: builder.build(),
        })
    }

    /// Build the MIME message for a composed email.
    ///
    /// An alternative body becomes `multipart/alternative` with the plain part
    /// first, so clients that render HTML prefer the last (HTML) part.
    pub fn build_message(email: &ComposedEmail) -> Result<Message, TransportError> {
        let from = email.from.mailbox()?;
        let to: Mailbox = email.to.parse()?;

        let builder = Message::builder().from(from).to(to).subject(&email.subject);

        let message = match &email.body {
            Body::Text(text) => builder
                .header(ContentType::TEXT_PLAIN)
                .body(text.clone())?,
            Body::Html(html) => builder
                .header(ContentType::TEXT_HTML)
                .body(html.clone())?,
            Body::Alternative { html, text } => builder
                .multipart(MultiPart::alternative_plain_html(text.clone(), html.clone()))?,
        };

        Ok(message)
    }
}

#[async_trait]
impl Transport for SmtpTransport {
    async fn deliver(&self, email: &ComposedEmail) -> Result<SendResult, TransportError> {
        let message = Self::build_message(email)?;

        let response = self.transport.send(message).await?;

        let message_id = response
            .message()
            .next()
            .map(|s| s.to_string())
            .unwrap_or_default();

        info!(
            to = %email.to,
            subject = %email.subject,
            "Email sent via SMTP"
        );

        Ok(SendResult { message_id })
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;

    fn email(body: Body) -> ComposedEmail {
        ComposedEmail {
            from: Sender::new("Support", "support@example.com"),
            to: "user@example.com".to_string(),
            subject: "Hello".to_string(),
            body,
        }
    }

    fn formatted(body: Body) -> String {
        let message = SmtpTransport::build_message(&email(body)).unwrap();
        String::from_utf8(message.formatted()).unwrap()
    }

    #[test]
    fn test_text_only_is_single_plain_part() {
        let raw = formatted(Body::Text("plain body".to_string()));
        assert!(raw.contains("Content-Type: text/plain"));
        assert!(!raw.contains("multipart/alternative"));
        assert!(!raw.contains("text/html"));
    }

    #[test]
    fn test_html_only_is_single_html_part() {
        let raw = formatted(Body::Html("<p>rich</p>".to_string()));
        assert!(raw.contains("Content-Type: text/html"));
        assert!(!raw.contains("multipart/alternative"));
    }

    #[test]
    fn test_both_bodies_are_alternative_parts() {
        let raw = formatted(Body::Alternative {
            html: "<p>rich</p>".to_string(),
            text: "plain".to_string(),
        });
        assert!(raw.contains("multipart/alternative"));

        let plain_at = raw.find("text/plain").unwrap();
        let html_at = raw.find("text/html").unwrap();
        assert!(plain_at < html_at);
    }

    #[test]
    fn test_headers() {
        let raw = formatted(Body::Text("x".to_string()));
        assert!(raw.contains("From: Support <support@example.com>"));
        assert!(raw.contains("To: user@example.com"));
        assert!(raw.contains("Subject: Hello"));
    }

    #[test]
    fn test_invalid_recipient() {
        let mut bad = email(Body::Text("x".to_string()));
        bad.to = "not-an-address".to_string();
        let err = SmtpTransport::build_message(&bad).unwrap_err();
        assert!(matches!(err, TransportError::Address(_)));
    }

    #[test]
    fn test_settings_credentials() {
        let mut settings = SmtpSettings::new("smtp.example.com");
        assert!(settings.credentials().is_none());

        settings.username = Some("mailer".to_string());
        settings.password = Some("secret".to_string());
        assert!(settings.credentials().is_some());
        assert_eq!(settings.port, DEFAULT_SMTP_PORT);
    }

    #[tokio::test]
    async fn test_new_plain_transport() {
        let mut settings = SmtpSettings::new("localhost");
        settings.port = 1025;
        settings.use_tls = false;

        let transport = SmtpTransport::new(&settings).unwrap();
        assert_eq!(transport.name(), "smtp");
    }
}
