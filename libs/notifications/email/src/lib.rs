//! Email composition and dispatch
//!
//! Callers obtain a driver from an [`EmailFactory`] using a [`DriverConfig`],
//! set the message fields on it, and call `send`. The driver validates the
//! message, composes it with the configured sender, and hands it to its
//! transport.
//!
//! ## Drivers
//!
//! | Alias | Driver | Transport |
//! |-------|--------|-----------|
//! | `postmark` | [`PostmarkDriver`] | Postmark HTTP API via reqwest |
//! | `smtp` | [`SmtpDriver`] | SMTP relay via lettre |
//! | `memory` | [`MemoryDriver`] | In-process outbox |
//!
//! ## Usage
//!
//! ```ignore
//! use email::{DriverConfig, EmailServiceProvider};
//!
//! let factory = EmailServiceProvider::factory();
//! let config = DriverConfig::for_driver("postmark")
//!     .with("token", token)
//!     .with_sender("Support", "support@example.com");
//!
//! let mut driver = factory.bootstrap(config)?;
//! driver
//!     .set_to("user@example.com")
//!     .set_text("Hello!")
//!     .set_html("<p>Hello!</p>");
//! driver.send().await?;
//! ```

pub mod composition;
pub mod config;
pub mod driver;
pub mod error;
pub mod factory;
pub mod models;
pub mod service;
pub mod transport;

// Re-export main types
pub use config::DriverConfig;
pub use driver::{EmailDriver, MemoryDriver, PostmarkDriver, SmtpDriver};
pub use error::{CompositionError, DriverError, EmailError, EmailResult, TransportError};
pub use factory::{DriverConstructor, EmailFactory};
pub use models::{Body, ComposedEmail, EmailMessage, Sender};
pub use service::EmailServiceProvider;
pub use transport::{
    MemoryTransport, PostmarkTransport, SendResult, SmtpSettings, SmtpTransport, Transport,
};
