//! Mailer
//!
//! Composes a single email from the command line and sends it through the
//! driver selected by `--driver`, falling back to `MAIL_DRIVER`.
//!
//! ```text
//! MAIL_TOKEN=... MAIL_FROM_ADDRESS=support@example.com \
//!     mailer send --to user@example.com --text "Hello" --html "<p>Hello</p>"
//! ```

pub mod config;

use clap::{Parser, Subcommand};
use core_config::mail::MailEnv;
use core_config::tracing::init_tracing;
use core_config::{Environment, FromEnv};
use email::{EmailFactory, EmailMessage, EmailServiceProvider, SendResult};
use eyre::{Result, WrapErr};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mailer")]
#[command(about = "Compose and send an email through a configured driver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one email
    Send {
        /// Recipient address
        #[arg(long)]
        to: String,

        /// Subject (defaults to "Message from <MAIL_FROM_NAME>")
        #[arg(short, long)]
        subject: Option<String>,

        /// Plain text body
        #[arg(long)]
        text: Option<String>,

        /// HTML body
        #[arg(long)]
        html: Option<String>,

        /// Driver alias, overriding `MAIL_DRIVER`
        #[arg(long)]
        driver: Option<String>,
    },

    /// List the registered driver aliases
    Drivers,
}

/// Build the message from command-line arguments
pub fn build_message(
    to: String,
    subject: Option<String>,
    text: Option<String>,
    html: Option<String>,
) -> EmailMessage {
    let mut message = EmailMessage::new().with_to(to);
    if let Some(subject) = subject {
        message.set_subject(subject);
    }
    if let Some(text) = text {
        message.set_text(text);
    }
    if let Some(html) = html {
        message.set_html(html);
    }
    message
}

/// Load mail settings, with `driver` taking precedence over `MAIL_DRIVER`
pub fn load_mail_env(driver: Option<String>) -> Result<MailEnv> {
    let mail = match driver {
        Some(driver) => MailEnv::for_driver(driver),
        None => MailEnv::from_env(),
    };
    mail.wrap_err("Failed to load mail configuration")
}

/// Bootstrap the configured driver and send `message` through it
pub async fn send(
    factory: &EmailFactory,
    mail: &MailEnv,
    message: EmailMessage,
) -> Result<SendResult> {
    let mut driver = factory
        .bootstrap(config::driver_config(mail))
        .wrap_err("Failed to select email driver")?;

    driver.set_message(message);
    info!(driver = driver.name(), to = %driver.to(), "Sending email");

    driver.send().await.wrap_err("Failed to send email")
}

/// Run the CLI
pub async fn run(cli: Cli) -> Result<()> {
    let environment = Environment::from_env();
    init_tracing(&environment);

    let factory = EmailServiceProvider::factory();

    match cli.command {
        Commands::Drivers => {
            for alias in factory.aliases() {
                println!("{alias}");
            }
        }
        Commands::Send {
            to,
            subject,
            text,
            html,
            driver,
        } => {
            let mail = load_mail_env(driver)?;
            let message = build_message(to, subject, text, html);

            let result = send(&factory, &mail, message).await?;
            println!("Email sent. Message ID: {}", result.message_id);
        }
    }

    Ok(())
}
