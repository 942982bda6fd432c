//! Startup wiring for the email service.
//!
//! The host application asks [`EmailServiceProvider`] for a ready
//! [`EmailFactory`] once, at boot, and passes it to whatever sends mail.

use crate::config::DriverConfig;
use crate::driver::{EmailDriver, MemoryDriver, PostmarkDriver, SmtpDriver};
use crate::factory::{DriverConstructor, EmailFactory};
use crate::transport::MemoryTransport;

/// Registers the built-in drivers.
pub struct EmailServiceProvider;

impl EmailServiceProvider {
    /// Service name the host registers the factory under
    pub const NAME: &'static str = "email";

    /// Built-in driver aliases and their constructors
    pub fn drivers() -> Vec<(&'static str, DriverConstructor)> {
        let postmark: DriverConstructor =
            Box::new(|config: DriverConfig| -> Box<dyn EmailDriver> {
                Box::new(PostmarkDriver::new(config))
            });
        let smtp: DriverConstructor = Box::new(|config: DriverConfig| -> Box<dyn EmailDriver> {
            Box::new(SmtpDriver::new(config))
        });

        vec![(PostmarkDriver::ALIAS, postmark), (SmtpDriver::ALIAS, smtp)]
    }

    /// Factory with every built-in driver registered
    pub fn factory() -> EmailFactory {
        let mut factory = EmailFactory::new();
        for (alias, constructor) in Self::drivers() {
            factory.register(alias, constructor);
        }
        factory
    }

    /// Register the `memory` driver, delivering into `transport`'s outbox
    pub fn register_memory(
        factory: &mut EmailFactory,
        transport: MemoryTransport,
    ) -> &mut EmailFactory {
        factory.register(MemoryDriver::ALIAS, move |config| {
            Box::new(MemoryDriver::new(config, transport.clone()))
        })
    }
}
