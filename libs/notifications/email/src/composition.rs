//! Sendability rules applied by every driver before dispatch.

use crate::config::DriverConfig;
use crate::error::{CompositionError, EmailResult};
use crate::models::{Body, ComposedEmail, EmailMessage};
use tracing::debug;

/// Subject used when the caller never set one
pub fn default_subject(from_name: &str) -> String {
    format!("Message from {}", from_name)
}

/// Validate `message` and compose it with the sender from `config`.
///
/// Checks run in a fixed order: recipient, content, then sender resolution.
pub fn compose(message: &EmailMessage, config: &DriverConfig) -> EmailResult<ComposedEmail> {
    if message.to().is_empty() {
        return Err(CompositionError::MissingRecipient.into());
    }

    let body = Body::select(message.text(), message.html())
        .ok_or(CompositionError::MissingContent)?;

    let from = config.sender()?;
    let subject = message
        .subject()
        .map(str::to_string)
        .unwrap_or_else(|| default_subject(&from.name));

    debug!(
        to = %message.to(),
        subject = %subject,
        alternative = matches!(body, Body::Alternative { .. }),
        "Composed email"
    );

    Ok(ComposedEmail {
        from,
        to: message.to().to_string(),
        subject,
        body,
    })
}
