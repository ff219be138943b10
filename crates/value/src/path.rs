//! Dotted paths.
//!
//! A path is a `.`-separated list of keys, one per tree level:
//! `"network.proxy.port"`. Segments must be non-empty, so leading, trailing
//! or doubled dots are rejected, as is the empty string.

use core::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

use crate::error::PathError;

/// Maximum number of path segments allowed (DoS protection)
pub const MAX_PATH_SEGMENTS: usize = 100;

/// A validated path borrowing its segments from the source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<'a> {
    raw: &'a str,
    segments: SmallVec<[&'a str; 8]>,
}

impl<'a> Path<'a> {
    /// Parse and validate a dotted path.
    ///
    /// ```rust
    /// use paramstore_value::Path;
    ///
    /// let path = Path::parse("a.b.c").unwrap();
    /// assert_eq!(path.segments(), ["a", "b", "c"]);
    /// assert!(Path::parse("a..c").is_err());
    /// ```
    pub fn parse(raw: &'a str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = SmallVec::new();
        for (position, segment) in raw.split('.').enumerate() {
            if position == MAX_PATH_SEGMENTS {
                return Err(PathError::TooDeep {
                    path: raw.to_owned(),
                    max: MAX_PATH_SEGMENTS,
                    actual: raw.split('.').count(),
                });
            }
            if segment.is_empty() {
                return Err(PathError::EmptySegment {
                    path: raw.to_owned(),
                    position,
                });
            }
            segments.push(segment);
        }

        Ok(Self { raw, segments })
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Number of segments; always at least one.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`: a parsed path has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment and the segments leading to it.
    pub fn split_leaf(&self) -> (&'a str, &[&'a str]) {
        match self.segments.split_last() {
            Some((leaf, parents)) => (*leaf, parents),
            None => (self.raw, &[]),
        }
    }
}

impl Display for Path<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

/// Whether `key` can be used as a single path segment.
pub fn is_valid_segment(key: &str) -> bool {
    !key.is_empty() && !key.contains('.')
}

/// Append `key` to `prefix` with a dot, or return `key` alone.
pub fn join(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{key}"),
        None => key.to_owned(),
    }
}
