use crate::error::TransportError;
use lettre::message::Mailbox;
use lettre::Address;
use serde::{Deserialize, Serialize};

/// Message fields set by the caller before dispatch.
///
/// No validation happens here; a driver checks sendability in `send`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient email address
    #[serde(default)]
    to: String,
    /// Subject, `None` until the caller sets one
    subject: Option<String>,
    /// Plain text body
    text: Option<String>,
    /// HTML body
    html: Option<String>,
}

impl EmailMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn set_to(&mut self, to: impl Into<String>) -> &mut Self {
        self.to = to.into();
        self
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn set_html(&mut self, html: impl Into<String>) -> &mut Self {
        self.html = Some(html.into());
        self
    }

    /// Set recipient
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.set_to(to);
        self
    }

    /// Set subject
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.set_subject(subject);
        self
    }

    /// Set plain text body
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Set HTML body
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.set_html(html);
        self
    }
}

/// Sender identity taken from the driver configuration's `from` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub name: String,
    pub email: String,
}

impl Sender {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Validated mailbox for this sender. An empty name yields the bare address.
    pub fn mailbox(&self) -> Result<Mailbox, TransportError> {
        let email: Address = self.email.parse()?;
        Ok(Mailbox::new(
            Some(self.name.clone()).filter(|n| !n.is_empty()),
            email,
        ))
    }
}

/// Body representation handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    /// Plain text only
    Text(String),
    /// HTML only
    Html(String),
    /// HTML primary body with the plain text attached as an alternative part
    Alternative { html: String, text: String },
}

impl Body {
    /// Picks the body layout for the given parts. Empty strings count as absent.
    ///
    /// Returns `None` when there is nothing to send.
    pub fn select(text: Option<&str>, html: Option<&str>) -> Option<Self> {
        let text = text.filter(|t| !t.is_empty());
        let html = html.filter(|h| !h.is_empty());

        match (text, html) {
            (Some(text), Some(html)) => Some(Body::Alternative {
                html: html.to_string(),
                text: text.to_string(),
            }),
            (Some(text), None) => Some(Body::Text(text.to_string())),
            (None, Some(html)) => Some(Body::Html(html.to_string())),
            (None, None) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Body::Text(text) | Body::Alternative { text, .. } => Some(text),
            Body::Html(_) => None,
        }
    }

    pub fn html(&self) -> Option<&str> {
        match self {
            Body::Html(html) | Body::Alternative { html, .. } => Some(html),
            Body::Text(_) => None,
        }
    }
}

/// Fully composed message, exactly what a transport receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedEmail {
    pub from: Sender,
    pub to: String,
    pub subject: String,
    pub body: Body,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_defaults_are_unset() {
        let message = EmailMessage::new();
        assert_eq!(message.to(), "");
        assert_eq!(message.subject(), None);
        assert_eq!(message.text(), None);
        assert_eq!(message.html(), None);
    }

    #[test]
    fn test_setters_chain_and_accept_empty() {
        let mut message = EmailMessage::new();
        message
            .set_to("user@example.com")
            .set_subject("")
            .set_text("Hello")
            .set_html("<p>Hello</p>");

        assert_eq!(message.to(), "user@example.com");
        assert_eq!(message.subject(), Some(""));
        assert_eq!(message.text(), Some("Hello"));
        assert_eq!(message.html(), Some("<p>Hello</p>"));
    }

    #[test]
    fn test_body_selection() {
        assert_eq!(
            Body::select(Some("plain"), None),
            Some(Body::Text("plain".to_string()))
        );
        assert_eq!(
            Body::select(None, Some("<b>rich</b>")),
            Some(Body::Html("<b>rich</b>".to_string()))
        );
        assert_eq!(
            Body::select(Some("plain"), Some("<b>rich</b>")),
            Some(Body::Alternative {
                html: "<b>rich</b>".to_string(),
                text: "plain".to_string(),
            })
        );
        assert_eq!(Body::select(None, None), None);
    }

    #[test]
    fn test_body_selection_treats_empty_as_absent() {
        assert_eq!(Body::select(Some(""), Some("")), None);
        assert_eq!(
            Body::select(Some(""), Some("<i>x</i>")),
            Some(Body::Html("<i>x</i>".to_string()))
        );
        // Presence, not truthiness: "0" and whitespace are content.
        assert_eq!(Body::select(Some("0"), None), Some(Body::Text("0".to_string())));
        assert_eq!(Body::select(Some(" "), None), Some(Body::Text(" ".to_string())));
    }

    #[test]
    fn test_sender_mailbox() {
        let mailbox = Sender::new("Support", "support@example.com").mailbox().unwrap();
        assert_eq!(mailbox.to_string(), "Support <support@example.com>");

        let bare = Sender::new("", "bare@example.com").mailbox().unwrap();
        assert_eq!(bare.name, None);
        assert_eq!(bare.to_string(), "bare@example.com");
    }

    #[test]
    fn test_sender_mailbox_rejects_invalid_address() {
        let err = Sender::new("Support", "not an address").mailbox().unwrap_err();
        assert!(matches!(err, TransportError::Address(_)));
    }
}
