//! History-tracked parameter store.
//!
//! A [`ParameterStore`] keeps three snapshots of the same parameters:
//!
//! - `current`: the live values, read and written by callers;
//! - `previous`: per path, the value `current` held before the last write;
//! - `initial`: the values the store was built with, plus anything added
//!   through [`add_setting`](ParameterStore::add_setting) or
//!   [`merge_settings`](ParameterStore::merge_settings).
//!
//! Snapshots are owned trees, so copying between them is always a deep copy.
//!
//! ```rust
//! use paramstore::ParameterStore;
//!
//! let mut store = ParameterStore::from_json(r#"{"x": 1}"#).unwrap();
//! store.set("x", 2.5).unwrap();
//! assert_eq!(store.get::<f64>("x", None), 2.0);
//!
//! store.undo(Some("x"));
//! assert_eq!(store.get::<i64>("x", None), 1);
//! ```

use core::str::FromStr;

use paramstore_value::path::{is_valid_segment, join};
use paramstore_value::{Castable, Path, Tree, TreeDiff, Value, WriteRejected};

use crate::config::{StoreConfig, UnknownKeys};
use crate::error::StoreError;

/// Where a path stands relative to its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterState {
    /// Not present in `current`.
    Unset,
    /// `current` and `previous` agree.
    Clean,
    /// `current` differs from `previous`; `undo` would change it.
    Pending,
}

/// Parameters with one generation of undo and a reset point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterStore {
    current: Tree,
    previous: Tree,
    initial: Tree,
    config: StoreConfig,
}

impl ParameterStore {
    // ==================== Construction ====================

    /// Create a store whose three snapshots all equal `initial`.
    #[must_use]
    pub fn new(initial: Tree) -> Self {
        Self::with_config(initial, StoreConfig::default())
    }

    #[must_use]
    pub fn with_config(initial: Tree, config: StoreConfig) -> Self {
        Self {
            current: initial.clone(),
            previous: initial.clone(),
            initial,
            config,
        }
    }

    /// Create a store from a JSON object.
    ///
    /// # Errors
    ///
    /// [`StoreError::Json`] for malformed text, [`StoreError::Decode`]
    /// when the document is not an object or nests too deeply.
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        parse_tree(text).map(Self::new)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ==================== Snapshots ====================

    pub fn current(&self) -> &Tree {
        &self.current
    }

    pub fn previous(&self) -> &Tree {
        &self.previous
    }

    pub fn initial(&self) -> &Tree {
        &self.initial
    }

    /// Whether `path` is present in `current`.
    pub fn contains(&self, path: &str) -> bool {
        self.current.contains_path(path)
    }

    // ==================== Typed access ====================

    /// Read `path` as `T`.
    ///
    /// Reads `current`, or `initial` when `current` lacks the path (for
    /// example after `set` replaced a parent sub-tree). Falls back to
    /// `default`, then to `T`'s default, when the chosen snapshot holds no
    /// castable value.
    pub fn get<T: Castable>(&self, path: &str, default: impl Into<Option<T>>) -> T {
        if self.current.contains_path(path) {
            self.current.get_as(path, default)
        } else {
            self.initial.get_as(path, default)
        }
    }

    /// Write `value` at `path`, casting into the kind stored there.
    ///
    /// On success `previous` holds the value `current` had before the write.
    /// A path missing from `current` but known to `initial` is reinstated
    /// with `initial`'s kind in both `current` and `previous`. Paths unknown
    /// to both are rejected; new parameters come from
    /// [`add_setting`](Self::add_setting).
    ///
    /// A rejected write changes nothing.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), WriteRejected> {
        match self.write_current(path, value.into()) {
            Ok(Some(before)) => {
                self.remember(path, before);
                Ok(())
            }
            Ok(None) => {
                if let Some(reinstated) = self.current.get(path).cloned() {
                    self.remember(path, reinstated);
                }
                Ok(())
            }
            Err(err) => {
                tracing::debug!(path, error = %err, "write rejected");
                Err(err)
            }
        }
    }

    /// Cast `value` into `current` at `path`.
    ///
    /// Returns the value that was replaced, or `None` when the path was
    /// reinstated from `initial`.
    fn write_current(&mut self, path: &str, value: Value) -> Result<Option<Value>, WriteRejected> {
        Path::parse(path)?;

        if let Some(before) = self.current.get(path).cloned() {
            self.current.assign(path, value)?;
            return Ok(Some(before));
        }

        let Some(seed) = self.initial.get(path) else {
            return Err(WriteRejected::unknown_parameter(path));
        };
        if !seed.accepts(&value) {
            return Err(WriteRejected::not_castable(
                path,
                seed.type_name(),
                value.type_name(),
            ));
        }
        let reinstated = seed.recast(&value);
        self.current.set(path, reinstated)?;
        Ok(None)
    }

    fn remember(&mut self, path: &str, value: Value) {
        if let Err(err) = self.previous.set(path, value) {
            tracing::debug!(path, error = %err, "previous value not recorded");
        }
    }

    // ==================== Structure ====================

    /// Create a new parameter with the same value in all three snapshots.
    ///
    /// Returns `false`, changing nothing, if `initial` already has `path` or
    /// the path cannot be created in one of the snapshots.
    pub fn add_setting(&mut self, path: &str, value: impl Into<Value>) -> bool {
        if self.initial.contains_path(path) {
            tracing::debug!(path, "parameter already exists");
            return false;
        }

        let writable = self
            .current
            .ensure_writable(path)
            .and_then(|()| self.previous.ensure_writable(path))
            .and_then(|()| self.initial.ensure_writable(path));
        if let Err(err) = writable {
            tracing::debug!(path, error = %err, "parameter not added");
            return false;
        }

        let value = value.into();
        let written = self
            .current
            .set(path, value.clone())
            .and_then(|()| self.previous.set(path, value.clone()))
            .and_then(|()| self.initial.set(path, value));
        match written {
            Ok(()) => {
                tracing::debug!(path, "parameter added");
                true
            }
            Err(err) => {
                tracing::warn!(path, error = %err, "parameter partially added");
                false
            }
        }
    }

    /// Remove `path` from all three snapshots. Missing paths are ignored.
    pub fn delete_setting(&mut self, path: &str) {
        let removed = [&mut self.current, &mut self.previous, &mut self.initial]
            .into_iter()
            .filter_map(|snapshot| snapshot.remove(path))
            .count();
        tracing::debug!(path, snapshots = removed, "parameter deleted");
    }

    /// Overwrite every top-level key of `settings` in all three snapshots.
    ///
    /// Values are stored as given; nothing is cast.
    pub fn merge_settings(&mut self, settings: Tree) {
        for (key, value) in settings {
            self.current.insert(key.clone(), value.clone());
            self.previous.insert(key.clone(), value.clone());
            self.initial.insert(key, value);
        }
    }

    // ==================== History ====================

    /// Copy `initial` into `current`, for one path or the whole tree.
    ///
    /// `previous` is left alone.
    pub fn reset(&mut self, path: Option<&str>) {
        tracing::debug!(path = path.unwrap_or("*"), "reset");
        copy_snapshot(&self.initial, &mut self.current, path);
    }

    /// Copy `previous` into `current`, for one path or the whole tree.
    pub fn undo(&mut self, path: Option<&str>) {
        tracing::debug!(path = path.unwrap_or("*"), "undo");
        copy_snapshot(&self.previous, &mut self.current, path);
    }

    /// Copy `current` into `previous`, making pending changes the new baseline.
    pub fn apply(&mut self, path: Option<&str>) {
        tracing::debug!(path = path.unwrap_or("*"), "apply");
        copy_snapshot(&self.current, &mut self.previous, path);
    }

    /// History state of `path`.
    pub fn state(&self, path: &str) -> ParameterState {
        match self.current.get(path) {
            None => ParameterState::Unset,
            Some(value) if self.previous.get(path) == Some(value) => ParameterState::Clean,
            Some(_) => ParameterState::Pending,
        }
    }

    /// Leaf differences from `previous` to `current`.
    pub fn pending_changes(&self) -> TreeDiff {
        self.previous.diff(&self.current)
    }

    /// Whether `current` differs from `initial`.
    pub fn is_modified(&self) -> bool {
        self.current != self.initial
    }

    // ==================== JSON ====================

    /// `current` as JSON text; empty if encoding fails.
    pub fn to_json(&self) -> String {
        let encoded = if self.config.pretty {
            serde_json::to_string_pretty(&self.current)
        } else {
            serde_json::to_string(&self.current)
        };
        encoded.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to encode current values");
            String::new()
        })
    }

    /// Reconcile a JSON document into `current`.
    ///
    /// Returns `false`, changing nothing, if `text` is not a JSON object.
    /// Otherwise `current` is first copied into `previous`, then each member
    /// is cast into the kind `current` holds for it. Members absent from
    /// `initial` are skipped, or added as new parameters under
    /// [`UnknownKeys::Adopt`]. Keys that are empty or contain `.` cannot be
    /// addressed and are always skipped.
    pub fn load_json(&mut self, text: &str) -> bool {
        let incoming = match parse_tree(text) {
            Ok(tree) => tree,
            Err(err) => {
                tracing::warn!(error = %err, "JSON document rejected");
                return false;
            }
        };

        self.previous.clone_from(&self.current);
        self.reconcile(&incoming, None);
        true
    }

    fn reconcile(&mut self, incoming: &Tree, prefix: Option<&str>) {
        for (key, value) in incoming.iter() {
            if !is_valid_segment(key) {
                tracing::trace!(key, "skipping key that is not a path segment");
                continue;
            }
            let path = join(prefix, key);

            match value {
                Value::Tree(child) if self.initial.get(&path).is_some_and(Value::is_tree) => {
                    self.reconcile(child, Some(&path));
                }
                _ if self.initial.contains_path(&path) => {
                    if let Err(err) = self.write_current(&path, value.clone()) {
                        tracing::trace!(path = %path, error = %err, "JSON value not applied");
                    }
                }
                _ => match self.config.unknown_keys {
                    UnknownKeys::Ignore => {
                        tracing::trace!(path = %path, "skipping key absent from initial values");
                    }
                    UnknownKeys::Adopt => {
                        self.add_setting(&path, value.clone());
                    }
                },
            }
        }
    }
}

impl FromStr for ParameterStore {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

fn parse_tree(text: &str) -> Result<Tree, StoreError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    Ok(Tree::try_from(json)?)
}

fn copy_snapshot(source: &Tree, target: &mut Tree, path: Option<&str>) {
    let Some(path) = path else {
        target.clone_from(source);
        return;
    };
    match source.get(path) {
        Some(value) => {
            if let Err(err) = target.set(path, value.clone()) {
                tracing::debug!(path, error = %err, "snapshot copy rejected");
            }
        }
        None => tracing::trace!(path, "path missing from source snapshot"),
    }
}
