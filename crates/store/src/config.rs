//! Store configuration.
//!
//! ```rust
//! use paramstore::{StoreConfig, UnknownKeys};
//!
//! let config = StoreConfig::from_json_str(r#"{"pretty": true}"#).unwrap();
//! assert!(config.pretty);
//! assert_eq!(config.unknown_keys, UnknownKeys::Ignore);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// What [`load_json`](crate::ParameterStore::load_json) does with keys that
/// are not part of the store's initial values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Skip them. Parameters are only created through `add_setting`.
    #[default]
    Ignore,
    /// Register them as new parameters, as `add_setting` would.
    Adopt,
}

/// Behaviour switches for a [`ParameterStore`](crate::ParameterStore).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Indent the output of `to_json`.
    pub pretty: bool,
    /// Policy for JSON keys absent from the initial values.
    pub unknown_keys: UnknownKeys,
}

impl StoreConfig {
    /// Parse a configuration document. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, StoreError> {
        serde_json::from_str(text).map_err(|e| StoreError::config(e.to_string()))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }
}
