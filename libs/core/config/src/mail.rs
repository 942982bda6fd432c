use crate::{
    env_optional, env_or_default, env_parse, env_required, parse_flag, ConfigError, FromEnv,
};

/// Driver used when `MAIL_DRIVER` is unset
pub const DEFAULT_MAIL_DRIVER: &str = "postmark";

/// SMTP connection settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpEnv {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tls: bool,
}

impl FromEnv for SmtpEnv {
    /// Reads:
    /// - SMTP_HOST (required)
    /// - SMTP_PORT: defaults to 587
    /// - SMTP_USERNAME / SMTP_PASSWORD: optional
    /// - SMTP_TLS: defaults to true
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_required("SMTP_HOST")?,
            port: env_parse("SMTP_PORT", 587)?,
            username: env_optional("SMTP_USERNAME"),
            password: env_optional("SMTP_PASSWORD"),
            tls: env_optional("SMTP_TLS").map_or(true, |v| parse_flag(&v)),
        })
    }
}

/// Mail settings the host application hands to the email factory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailEnv {
    /// Driver alias (`postmark`, `smtp`, ...)
    pub driver: String,
    /// Provider API token
    pub token: Option<String>,
    pub from_name: String,
    pub from_email: String,
    /// Override for the provider API base URL
    pub endpoint: Option<String>,
    /// Present when the driver is `smtp`
    pub smtp: Option<SmtpEnv>,
}

impl MailEnv {
    pub fn is_smtp(&self) -> bool {
        self.driver == "smtp"
    }

    /// Load settings for an explicitly chosen driver, ignoring `MAIL_DRIVER`.
    ///
    /// The driver decides which variables are required: `MAIL_TOKEN` for
    /// postmark, `SMTP_*` for smtp.
    pub fn for_driver(driver: impl Into<String>) -> Result<Self, ConfigError> {
        let driver = driver.into();

        let token = if driver == DEFAULT_MAIL_DRIVER {
            Some(env_required("MAIL_TOKEN")?)
        } else {
            env_optional("MAIL_TOKEN")
        };

        let smtp = if driver == "smtp" {
            Some(SmtpEnv::from_env()?)
        } else {
            None
        };

        Ok(Self {
            driver,
            token,
            from_name: env_or_default("MAIL_FROM_NAME", "Notifications"),
            from_email: env_required("MAIL_FROM_ADDRESS")?,
            endpoint: env_optional("MAIL_ENDPOINT"),
            smtp,
        })
    }
}

impl FromEnv for MailEnv {
    /// Reads:
    /// - MAIL_DRIVER: defaults to "postmark"
    /// - MAIL_TOKEN: required for postmark
    /// - MAIL_FROM_NAME: defaults to "Notifications"
    /// - MAIL_FROM_ADDRESS (required)
    /// - MAIL_ENDPOINT: optional
    /// - SMTP_* when the driver is "smtp"
    fn from_env() -> Result<Self, ConfigError> {
        Self::for_driver(env_or_default("MAIL_DRIVER", DEFAULT_MAIL_DRIVER))
    }
}
