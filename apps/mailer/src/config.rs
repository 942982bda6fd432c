//! Translate environment settings into a driver configuration.

use core_config::mail::MailEnv;
use email::DriverConfig;

/// Build the `DriverConfig` handed to the email factory
pub fn driver_config(mail: &MailEnv) -> DriverConfig {
    let mut config =
        DriverConfig::for_driver(&mail.driver).with_sender(&mail.from_name, &mail.from_email);

    if let Some(token) = &mail.token {
        config = config.with("token", token.as_str());
    }
    if let Some(endpoint) = &mail.endpoint {
        config = config.with("endpoint", endpoint.as_str());
    }
    if let Some(smtp) = &mail.smtp {
        config = config
            .with("host", smtp.host.as_str())
            .with("port", smtp.port)
            .with("tls", smtp.tls);
        if let Some(username) = &smtp.username {
            config = config.with("username", username.as_str());
        }
        if let Some(password) = &smtp.password {
            config = config.with("password", password.as_str());
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::mail::SmtpEnv;

    fn mail_env(driver: &str) -> MailEnv {
        MailEnv {
            driver: driver.to_string(),
            token: None,
            from_name: "Support".to_string(),
            from_email: "support@example.com".to_string(),
            endpoint: None,
            smtp: None,
        }
    }

    #[test]
    fn test_postmark_config() {
        let mut mail = mail_env("postmark");
        mail.token = Some("server-token".to_string());
        mail.endpoint = Some("http://localhost:8025".to_string());

        let config = driver_config(&mail);

        assert_eq!(config.driver_type().as_deref(), Some("postmark"));
        assert_eq!(config.get_str("token"), Some("server-token"));
        assert_eq!(config.get_str("endpoint"), Some("http://localhost:8025"));
        let sender = config.sender().unwrap();
        assert_eq!(sender.name, "Support");
        assert_eq!(sender.email, "support@example.com");
        assert!(!config.contains("host"));
    }

    #[test]
    fn test_smtp_config() {
        let mut mail = mail_env("smtp");
        mail.smtp = Some(SmtpEnv {
            host: "localhost".to_string(),
            port: 1025,
            username: Some("mailer".to_string()),
            password: None,
            tls: false,
        });

        let config = driver_config(&mail);

        assert_eq!(config.get_str("host"), Some("localhost"));
        assert_eq!(config.get("port").and_then(|v| v.as_u64()), Some(1025));
        assert_eq!(config.get("tls").and_then(|v| v.as_bool()), Some(false));
        assert_eq!(config.get_str("username"), Some("mailer"));
        assert!(!config.contains("password"));
        assert!(!config.contains("token"));
    }
}
