//! # paramstore
//!
//! A parameter store over dynamically typed value trees, with one generation
//! of undo, a reset point and JSON import/export.
//!
//! Values are addressed by dotted paths and cast on every read and write:
//! a parameter keeps the kind it was created with, and assignments of other
//! kinds are converted into it. Reads never fail; they degrade to a default.
//!
//! ```rust
//! use paramstore::ParameterStore;
//!
//! let mut store: ParameterStore = r#"{"a": 100, "b": 2.5, "s": "222", "sx": "Test"}"#
//!     .parse()
//!     .unwrap();
//!
//! assert_eq!(store.get::<i64>("b", 10), 2);
//! assert_eq!(store.get::<i64>("sx", 10), 10);
//!
//! assert!(store.set("c", 1).is_err());
//! assert!(store.add_setting("c", 300.0));
//! store.set("c", 10).unwrap();
//! assert_eq!(store.get::<f64>("c", 0.0), 10.0);
//! ```
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod store;

pub use config::{StoreConfig, UnknownKeys};
pub use error::StoreError;
pub use store::{ParameterState, ParameterStore};

pub use paramstore_value::{
    Castable, EnumKind, EnumValue, Tree, TreeDiff, Value, ValueKind, WriteRejected, castable_enum,
};
