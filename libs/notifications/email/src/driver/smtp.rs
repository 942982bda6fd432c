//! SMTP driver

use super::{deliver, EmailDriver};
use crate::composition::compose;
use crate::config::DriverConfig;
use crate::error::{EmailError, EmailResult};
use crate::models::EmailMessage;
use crate::transport::smtp::DEFAULT_SMTP_PORT;
use crate::transport::{SendResult, SmtpSettings, SmtpTransport};
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde_json::Value;

/// Driver delivering through an SMTP relay.
///
/// Config keys: `host` (required), `port`, `username`, `password`, `tls`.
pub struct SmtpDriver {
    config: DriverConfig,
    message: EmailMessage,
    transport: OnceCell<SmtpTransport>,
}

impl SmtpDriver {
    pub const ALIAS: &'static str = "smtp";

    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            message: EmailMessage::new(),
            transport: OnceCell::new(),
        }
    }

    /// Connection settings read from the stored configuration
    pub fn settings(&self) -> EmailResult<SmtpSettings> {
        let mut settings = SmtpSettings::new(self.config.require_str("host")?);

        if let Some(port) = self.config.get("port") {
            settings.port = parse_port(port).ok_or_else(|| {
                EmailError::invalid_config("port", format!("expected a port number, got {port}"))
            })?;
        }
        settings.username = self.config.get_str("username").map(str::to_string);
        settings.password = self.config.get_str("password").map(str::to_string);
        if let Some(tls) = self.config.get("tls") {
            settings.use_tls = parse_tls(tls).ok_or_else(|| {
                EmailError::invalid_config("tls", format!("expected a boolean flag, got {tls}"))
            })?;
        }

        Ok(settings)
    }

    fn transport(&self) -> EmailResult<&SmtpTransport> {
        self.transport.get_or_try_init(|| -> EmailResult<SmtpTransport> {
            let settings = self.settings()?;
            Ok(SmtpTransport::new(&settings)?)
        })
    }
}

fn parse_port(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Value::String(s) => s.parse().ok(),
        Value::Null => Some(DEFAULT_SMTP_PORT),
        _ => None,
    }
}

/// Accepts booleans and the usual flag spellings, in any case.
/// `null` keeps TLS on; anything else is rejected rather than guessed.
fn parse_tls(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(tls) => Some(*tls),
        Value::Null => Some(true),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[async_trait]
impl EmailDriver for SmtpDriver {
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
