//! Postmark transport
//!
//! Sends emails via the Postmark HTTP API.

use super::{SendResult, Transport};
use crate::error::TransportError;
use crate::models::ComposedEmail;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Postmark API base URL
pub const POSTMARK_API_URL: &str = "https://api.postmarkapp.com";

/// Header carrying the server token
const TOKEN_HEADER: &str = "X-Postmark-Server-Token";

/// Postmark transport
pub struct PostmarkTransport {
    token: String,
    endpoint: String,
    message_stream: Option<String>,
    client: Client,
}

impl PostmarkTransport {
    /// Create a transport against the public Postmark API
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoint(token, POSTMARK_API_URL)
    }

    /// Create a transport against a custom base URL
    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            message_stream: None,
            client: Client::new(),
        }
    }

    /// Send through a specific message stream instead of the server default
    pub fn with_message_stream(mut self, stream: impl Into<String>) -> Self {
        self.message_stream = Some(stream.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Postmark `/email` request payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkRequest<'a> {
    from: String,
    to: &'a str,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_stream: Option<&'a str>,
}

impl<'a> PostmarkRequest<'a> {
    fn new(
        email: &'a ComposedEmail,
        message_stream: Option<&'a str>,
    ) -> Result<Self, TransportError> {
        Ok(Self {
            from: email.from.mailbox()?.to_string(),
            to: &email.to,
            subject: &email.subject,
            html_body: email.body.html(),
            text_body: email.body.text(),
            message_stream,
        })
    }
}

/// Postmark API response, for both success and error statuses
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkResponse {
    #[serde(rename = "MessageID", default)]
    message_id: Option<String>,
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    message: String,
}

#[async_trait]
impl Transport for PostmarkTransport {
    async fn deliver(&self, email: &ComposedEmail) -> Result<SendResult, TransportError> {
        let request = PostmarkRequest::new(email, self.message_stream.as_deref())?;

        debug!(
            to = %email.to,
            subject = %email.subject,
            "Sending email via Postmark"
        );

        let response = self
            .client
            .post(format!("{}/email", self.endpoint))
            .header(TOKEN_HEADER, &self.token)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let body: PostmarkResponse = response.json().await?;
            let message_id = body.message_id.unwrap_or_default();

            debug!(message_id = %message_id, "Postmark accepted email");

            Ok(SendResult { message_id })
        } else {
            let text = response.text().await.unwrap_or_default();
            let (code, message) = match serde_json::from_str::<PostmarkResponse>(&text) {
                Ok(body) => (body.error_code, body.message),
                Err(_) => (0, text),
            };

            Err(TransportError::Rejected {
                status: status.as_u16(),
                code,
                message,
            })
        }
    }

    fn name(&self) -> &'static str {
        "postmark"
    }
}
