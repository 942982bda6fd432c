//! Driver selection
//!
//! [`EmailFactory`] maps the `type` of a [`DriverConfig`] to a registered
//! constructor. It is built once at startup and then shared read-only with
//! whatever needs to bootstrap drivers.

use crate::config::DriverConfig;
use crate::driver::EmailDriver;
use crate::error::{DriverError, EmailResult};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Builds a driver from its configuration.
pub type DriverConstructor = Box<dyn Fn(DriverConfig) -> Box<dyn EmailDriver> + Send + Sync>;

/// Registry of driver constructors keyed by alias.
#[derive(Default)]
pub struct EmailFactory {
    drivers: HashMap<String, DriverConstructor>,
}

impl EmailFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under `alias`, replacing any previous one.
    pub fn register<F>(&mut self, alias: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(DriverConfig) -> Box<dyn EmailDriver> + Send + Sync + 'static,
    {
        let alias = alias.into();
        debug!(alias = %alias, "Registering email driver");
        self.drivers.insert(alias, Box::new(constructor));
        self
    }

    /// Build the driver named by `config`'s `type`.
    ///
    /// # Errors
    ///
    /// - [`DriverError::NotDefined`] when `type` is absent
    /// - [`DriverError::Unrecognised`] when no driver is registered for it
    pub fn bootstrap(&self, config: DriverConfig) -> EmailResult<Box<dyn EmailDriver>> {
        let driver_type = config.driver_type().ok_or(DriverError::NotDefined)?;

        let constructor = self
            .drivers
            .get(&driver_type)
            .ok_or_else(|| DriverError::Unrecognised(driver_type.clone()))?;

        debug!(driver = %driver_type, "Bootstrapping email driver");

        Ok(constructor(config))
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.drivers.contains_key(alias)
    }

    /// Registered aliases, sorted
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.drivers.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }
}

impl fmt::Debug for EmailFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailFactory")
            .field("drivers", &self.aliases())
            .finish()
    }
}
