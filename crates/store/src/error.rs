//! Store error types.
//!
//! Reads and history operations never fail. Only building a store from JSON
//! text and loading a configuration document return errors; writes report
//! [`WriteRejected`](paramstore_value::WriteRejected) from the value crate.

use paramstore_value::DecodeError;
use thiserror::Error;

/// Failure to build a store or its configuration from text.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StoreError {
    /// The text is not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document is well-formed but does not map onto a tree.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A configuration document could not be applied.
    #[error("invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Machine-readable code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Json(_) => "STORE_JSON",
            Self::Decode(_) => "STORE_DECODE",
            Self::Config(_) => "STORE_CONFIG",
        }
    }
}
