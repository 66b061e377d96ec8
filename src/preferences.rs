//! Preference store consumed by the connector.
//!
//! The host owns persistence. The connector reads the values below on every call
//! and never caches them.

use std::collections::BTreeMap;

use serde_json::Value;

/// Whether the connector is switched on (bool).
pub const PREFS_ENABLED: &str = "enable_werbelokal";
/// werbelokal.de login (string).
pub const PREFS_USERNAME: &str = "username_werbelokal";
/// werbelokal.de password (string).
pub const PREFS_PASSWORD: &str = "password_werbelokal";

/// Read access to host preferences.
///
/// Missing keys and values of the wrong type yield `default`.
pub trait PreferenceStore: Send + Sync {
    fn get_bool(&self, key: &str, default: bool) -> bool;

    fn get_string(&self, key: &str, default: &str) -> String;
}

/// In-memory preference store, also loadable from a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryPreferences {
    values: BTreeMap<String, Value>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enabled store holding the given credentials.
    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        let mut prefs = Self::new();
        prefs.set_bool(PREFS_ENABLED, true);
        prefs.set_string(PREFS_USERNAME, username);
        prefs.set_string(PREFS_PASSWORD, password);
        prefs
    }

    /// Load a flat JSON object such as
    /// `{"enable_werbelokal": true, "username_werbelokal": "me@example.org"}`.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let values: BTreeMap<String, Value> = serde_json::from_str(json)?;
        Ok(Self { values })
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.values.insert(key.into(), Value::Bool(value));
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), Value::String(value.into()));
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.values
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_owned()
    }
}
