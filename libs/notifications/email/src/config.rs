//! Driver configuration.
//!
//! An opaque JSON object. Only `type` is read by the factory; everything else
//! belongs to the selected driver (`token`, `from.name`, `from.email`, ...).

use crate::error::{EmailError, EmailResult};
use crate::models::Sender;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key the factory uses to pick a driver
pub const TYPE_KEY: &str = "type";

/// Mapping of configuration keys to values, owned by the driver it builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverConfig(Map<String, Value>);

impl DriverConfig {
    /// Empty configuration (no `type`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration selecting the given driver alias
    pub fn for_driver(driver_type: impl Into<String>) -> Self {
        Self::new().with(TYPE_KEY, driver_type.into())
    }

    /// Set a key, replacing any previous value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set the `from` record
    pub fn with_sender(self, name: impl Into<String>, email: impl Into<String>) -> Self {
        let mut from = Map::new();
        from.insert("name".to_string(), Value::String(name.into()));
        from.insert("email".to_string(), Value::String(email.into()));
        self.with("from", Value::Object(from))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// String value of a key; `None` when absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// String value of a key, or a configuration error naming it
    pub fn require_str(&self, key: &str) -> EmailResult<&str> {
        self.get_str(key)
            .ok_or_else(|| EmailError::missing_config(key))
    }

    /// The `type` value as the factory sees it.
    ///
    /// `None` when the key is absent. Non-string values are rendered as JSON so
    /// they can still be reported as unrecognised.
    pub fn driver_type(&self) -> Option<String> {
        self.0.get(TYPE_KEY).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Sender identity from `from.name` and `from.email`
    pub fn sender(&self) -> EmailResult<Sender> {
        let from = self
            .0
            .get("from")
            .and_then(Value::as_object)
            .ok_or_else(|| EmailError::missing_config("from"))?;

        let name = from
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| EmailError::missing_config("from.name"))?;
        let email = from
            .get("email")
            .and_then(Value::as_str)
            .ok_or_else(|| EmailError::missing_config("from.email"))?;

        Ok(Sender::new(name, email))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for DriverConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
