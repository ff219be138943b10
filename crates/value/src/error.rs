//! Error types for path parsing, tree writes and JSON decoding.
//!
//! None of these ever escape a read: lookups degrade to defaults. They are
//! returned from writes so a caller *can* tell a rejected assignment apart
//! from an applied one, but a rejected write never mutates the tree.

use thiserror::Error;

/// A dotted path that cannot address a tree position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path string is empty.
    #[error("empty path")]
    Empty,

    /// A segment between dots is empty (`a..b`, `.a`, `a.`).
    #[error("empty segment at position {position} in path `{path}`")]
    EmptySegment { path: String, position: usize },

    /// The path has more segments than the tree will walk.
    #[error("path `{path}` has {actual} segments, limit is {max}")]
    TooDeep {
        path: String,
        max: usize,
        actual: usize,
    },
}

/// Why a write left the tree untouched.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteRejected {
    /// The path itself is malformed.
    #[error(transparent)]
    InvalidPath(#[from] PathError),

    /// An intermediate segment holds a scalar, so it cannot be descended into.
    #[error("`{segment}` in path `{path}` is not a sub-tree")]
    TypeCollision { path: String, segment: String },

    /// The stored element's kind does not accept the assigned value.
    #[error("`{path}` holds {expected}, which cannot be cast from {actual}")]
    NotCastable {
        path: String,
        expected: String,
        actual: String,
    },

    /// The store only creates parameters through `add_setting`.
    #[error("unknown parameter `{path}`")]
    UnknownParameter { path: String },
}

impl WriteRejected {
    /// Create a type collision rejection.
    pub fn type_collision(path: &str, segment: &str) -> Self {
        Self::TypeCollision {
            path: path.to_owned(),
            segment: segment.to_owned(),
        }
    }

    /// Create a not-castable rejection.
    pub fn not_castable(
        path: &str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::NotCastable {
            path: path.to_owned(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an unknown parameter rejection.
    pub fn unknown_parameter(path: impl Into<String>) -> Self {
        Self::UnknownParameter { path: path.into() }
    }

    /// Machine-readable code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPath(_) => "WRITE_INVALID_PATH",
            Self::TypeCollision { .. } => "WRITE_TYPE_COLLISION",
            Self::NotCastable { .. } => "WRITE_NOT_CASTABLE",
            Self::UnknownParameter { .. } => "WRITE_UNKNOWN_PARAMETER",
        }
    }
}

/// A JSON value that cannot become a [`Tree`](crate::Tree).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Only JSON objects map onto trees.
    #[error("expected a JSON object, got {actual}")]
    NotAnObject { actual: &'static str },

    /// The object could not be mapped onto a tree, e.g. it nests too deeply.
    #[error("invalid JSON document: {message}")]
    Invalid { message: String },
}
