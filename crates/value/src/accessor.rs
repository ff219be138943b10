//! Typed path access with casting.
//!
//! Reads resolve a path and cast the stored element into the requested Rust
//! type. Writes follow the cast-to-existing-type policy: an element that
//! already exists keeps its kind and the assigned value is cast into it; an
//! absent element is created holding the value as given, which fixes its
//! kind for later writes.
//!
//! ```rust
//! use paramstore_value::{Tree, Value};
//!
//! let mut tree = Tree::new().with("x", 1);
//! tree.assign("x", 2.5).unwrap();
//! assert_eq!(tree.get("x"), Some(&Value::Int(2)));
//!
//! tree.assign("c", 300.0).unwrap();
//! tree.assign("c", 10).unwrap();
//! assert_eq!(tree.get_as::<f64>("c", None), 10.0);
//! ```

use crate::cast::Castable;
use crate::error::WriteRejected;
use crate::tree::Tree;
use crate::value::Value;

impl Tree {
    /// Read `path` as `T`.
    ///
    /// Returns `default` (or `T::default_value()` without one) when the path
    /// does not resolve or the stored element cannot be cast into `T`.
    pub fn get_as<T: Castable>(&self, path: &str, default: impl Into<Option<T>>) -> T {
        let default = default.into();
        match self.get(path) {
            Some(stored) if T::is_castable_from(stored) => T::cast_from(stored),
            Some(stored) => {
                tracing::trace!(
                    path,
                    stored = %stored.type_name(),
                    requested = %T::kind(),
                    "stored value not castable, using default"
                );
                default.unwrap_or_else(T::default_value)
            }
            None => default.unwrap_or_else(T::default_value),
        }
    }

    /// Write `value` at `path`, casting into the kind already stored there.
    ///
    /// - existing element: replaced by `value` cast into its kind, or
    ///   [`WriteRejected::NotCastable`] if its kind does not accept `value`;
    /// - absent element: created (with intermediate trees) holding `value`;
    /// - scalar on an intermediate segment: [`WriteRejected::TypeCollision`].
    ///
    /// A rejected write leaves the tree unchanged.
    pub fn assign(&mut self, path: &str, value: impl Into<Value>) -> Result<(), WriteRejected> {
        let value = value.into();

        if let Some(existing) = self.get_mut(path) {
            if !existing.accepts(&value) {
                return Err(WriteRejected::not_castable(
                    path,
                    existing.type_name(),
                    value.type_name(),
                ));
            }
            *existing = existing.recast(&value);
            return Ok(());
        }

        self.set(path, value)
    }
}
