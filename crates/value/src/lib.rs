//! # paramstore-value
//!
//! Dynamically typed value trees addressed by dotted paths.
//!
//! - [`Value`]: a tagged union of the scalar kinds, enum codes and nested
//!   [`Tree`]s.
//! - [`Castable`]: total, lenient conversion between kinds. A cast never
//!   fails; input that does not fit resolves to the target's default.
//! - [`Tree`]: ordered key/value mapping with path access
//!   (`"network.proxy.port"`), raw ([`Tree::set`]) and casting
//!   ([`Tree::assign`], [`Tree::get_as`]) operations.
//! - [`EnumKind`] and [`castable_enum!`]: enumerations with integer codes and
//!   optional aliases used for readable JSON.
//!
//! ```rust
//! use paramstore_value::prelude::*;
//!
//! let mut tree: Tree = serde_json::from_str(r#"{"a": 100, "s": "222", "sx": "Test"}"#).unwrap();
//! assert_eq!(tree.get_as::<i64>("s", 10), 222);
//! assert_eq!(tree.get_as::<i64>("sx", 10), 10);
//!
//! tree.assign("net.port", 8080).unwrap();
//! assert_eq!(tree.get_as::<String>("net.port", None), "8080");
//! ```
#![warn(clippy::all)]

mod accessor;
pub mod cast;
pub mod enumeration;
pub mod error;
mod json;
pub mod kind;
pub mod path;
pub mod tree;
pub mod value;

pub use cast::Castable;
pub use enumeration::{EnumKind, EnumValue};
pub use error::{DecodeError, PathError, WriteRejected};
pub use kind::ValueKind;
pub use path::{MAX_PATH_SEGMENTS, Path};
pub use tree::{Tree, TreeDiff};
pub use value::Value;

/// Prelude for common imports
pub mod prelude {
    pub use crate::castable_enum;
    pub use crate::{Castable, EnumKind, EnumValue, Tree, Value, ValueKind, WriteRejected};
}
