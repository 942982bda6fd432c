//! Error types for email composition and dispatch.

use thiserror::Error;

/// Result type for email operations.
pub type EmailResult<T> = Result<T, EmailError>;

/// Failure to resolve a configuration's `type` to a registered driver.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    /// The configuration carries no `type` key.
    #[error("Email driver is not defined")]
    NotDefined,

    /// The `type` does not match any registered alias.
    #[error("Email driver is unrecognised: {0}")]
    Unrecognised(String),
}

/// Failure due to an incomplete message, detected before any transport attempt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositionError {
    #[error("Params 'to' required")]
    MissingRecipient,

    #[error("Params 'text' or 'html' required")]
    MissingContent,
}

/// Errors raised by a transport while delivering a composed message.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request to the provider could not be completed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider rejected message ({status}, code {code}): {message}")]
    Rejected {
        status: u16,
        code: i64,
        message: String,
    },

    /// SMTP conversation failed.
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// The MIME message could not be built.
    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    /// A sender or recipient is not a valid mailbox.
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The transport refused to accept the message.
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// Umbrella error for everything the email layer can raise.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error(transparent)]
    Composition(#[from] CompositionError),

    /// The driver configuration lacks a key the driver needs.
    #[error("Email driver configuration is missing '{key}'")]
    Configuration { key: String },

    /// A configuration key is present but holds an unusable value.
    #[error("Email driver configuration has invalid '{key}': {details}")]
    InvalidConfiguration { key: String, details: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl EmailError {
    pub(crate) fn missing_config(key: impl Into<String>) -> Self {
        Self::Configuration { key: key.into() }
    }

    pub(crate) fn invalid_config(key: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            key: key.into(),
            details: details.into(),
        }
    }

    /// Whether this is a driver-selection failure.
    pub fn is_driver(&self) -> bool {
        matches!(self, Self::Driver(_))
    }

    /// Whether this is a composition failure.
    pub fn is_composition(&self) -> bool {
        matches!(self, Self::Composition(_))
    }

    /// Whether this failure originated in the transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
