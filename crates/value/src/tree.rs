//! Dynamic value tree.
//!
//! A [`Tree`] maps string keys to [`Value`]s; a value may itself be a tree,
//! which gives arbitrarily deep nesting addressed by dotted paths. Children
//! are owned: cloning a tree deep-copies every nested level, so two clones
//! never observe each other's mutations.
//!
//! Raw path operations live here. They never cast: [`Tree::set`] stores the
//! value exactly as given. Casting writes are in the accessor module
//! ([`Tree::assign`], [`Tree::get_as`]).

use indexmap::IndexMap;

use crate::error::WriteRejected;
use crate::path::{self, Path};
use crate::value::Value;

/// A mapping from keys to values, nested through [`Value::Tree`].
///
/// Iteration follows insertion order; equality does not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    entries: IndexMap<String, Value>,
}

impl Tree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    // ==================== Direct children ====================

    /// Insert a direct child, replacing any previous value under `key`.
    ///
    /// `key` is taken literally; it is not split on dots.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Direct child by literal key.
    #[must_use]
    pub fn get_key(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ==================== Path operations ====================

    /// Whether `path` resolves to an element, whatever its kind.
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Element at `path`.
    ///
    /// `None` if the path is malformed, a segment is absent, or a segment
    /// before the last one is not a tree.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let path = Path::parse(path).ok()?;
        let (leaf, parents) = path.split_leaf();

        let mut node = self;
        for segment in parents {
            node = node.entries.get(*segment)?.as_tree()?;
        }
        node.entries.get(leaf)
    }

    /// Mutable element at `path`; same resolution rules as [`get`](Self::get).
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
        let path = Path::parse(path).ok()?;
        let (leaf, parents) = path.split_leaf();

        let mut node = self;
        for segment in parents {
            node = node.entries.get_mut(*segment)?.as_tree_mut()?;
        }
        node.entries.get_mut(leaf)
    }

    /// Store `value` at `path` exactly as given.
    ///
    /// Absent intermediate segments are created as empty trees. An
    /// intermediate segment holding a scalar rejects the write; an existing
    /// scalar is never replaced by a sub-tree through path assignment. The
    /// leaf itself is overwritten whatever its kind.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), WriteRejected> {
        let parsed = Path::parse(path)?;
        let (leaf, parents) = parsed.split_leaf();

        // A collision can only sit on an existing key, and everything below a
        // freshly created tree is new, so a rejection never leaves debris.
        let mut node = self;
        for segment in parents {
            let slot = node
                .entries
                .entry((*segment).to_owned())
                .or_insert_with(Value::empty_tree);
            match slot {
                Value::Tree(child) => node = child,
                _ => return Err(WriteRejected::type_collision(path, segment)),
            }
        }

        node.entries.insert(leaf.to_owned(), value.into());
        Ok(())
    }

    /// Check that [`set`](Self::set) at `path` would succeed, without writing.
    pub fn ensure_writable(&self, path: &str) -> Result<(), WriteRejected> {
        let parsed = Path::parse(path)?;
        let (_, parents) = parsed.split_leaf();

        let mut node = self;
        for segment in parents {
            match node.entries.get(*segment) {
                None => return Ok(()),
                Some(Value::Tree(child)) => node = child,
                Some(_) => return Err(WriteRejected::type_collision(path, segment)),
            }
        }
        Ok(())
    }

    /// Remove and return the element at `path`; `None` if it does not exist.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let parsed = Path::parse(path).ok()?;
        let (leaf, parents) = parsed.split_leaf();

        let mut node = self;
        for segment in parents {
            node = node.entries.get_mut(*segment)?.as_tree_mut()?;
        }
        node.entries.shift_remove(leaf)
    }

    // ==================== Whole-tree queries ====================

    /// Dotted paths of every scalar leaf, depth first in insertion order.
    ///
    /// Empty sub-trees contribute their own path so they are not lost in a
    /// comparison.
    #[must_use]
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_leaf_paths(None, &mut out);
        out
    }

    fn collect_leaf_paths(&self, prefix: Option<&str>, out: &mut Vec<String>) {
        for (key, value) in &self.entries {
            let full = path::join(prefix, key);
            match value {
                Value::Tree(child) if !child.is_empty() => {
                    child.collect_leaf_paths(Some(&full), out);
                }
                _ => out.push(full),
            }
        }
    }

    /// Leaf-level differences from `self` to `other`.
    #[must_use]
    pub fn diff(&self, other: &Self) -> TreeDiff {
        let mut added = Vec::new();
        let mut removed = Vec::new();
        let mut changed = Vec::new();

        for path in other.leaf_paths() {
            if self.get(&path).is_none() {
                added.push(path);
            }
        }

        for path in self.leaf_paths() {
            match other.get(&path) {
                None => removed.push(path),
                Some(theirs) if self.get(&path) != Some(theirs) => changed.push(path),
                Some(_) => {}
            }
        }

        added.sort();
        removed.sort();
        changed.sort();

        TreeDiff {
            added,
            removed,
            changed,
        }
    }
}

impl FromIterator<(String, Value)> for Tree {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Tree {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Describes the differences between two trees, as sorted leaf paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDiff {
    /// Paths present in `other` but not in `self`.
    pub added: Vec<String>,
    /// Paths present in `self` but not in `other`.
    pub removed: Vec<String>,
    /// Paths present in both but with different values.
    pub changed: Vec<String>,
}

impl TreeDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}
