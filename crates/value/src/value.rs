//! The `Value` tagged union.
//!
//! A value is either a scalar (one of the primitive kinds or an enum code) or
//! a nested [`Tree`]. There is no null variant: absence is the lack of a key.

use core::fmt::{self, Display, Formatter};

use crate::enumeration::EnumValue;
use crate::kind::ValueKind;
use crate::tree::Tree;

/// Any value that can live inside a [`Tree`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed integer (i64)
    Int(i64),

    /// Unsigned integer (u64)
    UInt(u64),

    /// Single precision float
    Float(f32),

    /// Double precision float
    Double(f64),

    /// UTF-8 string
    String(String),

    /// Code of a registered enum kind
    Enum(EnumValue),

    /// Nested tree
    Tree(Tree),
}

impl Value {
    // ==================== Constructors ====================

    /// Create a string value from String or &str
    pub fn string(v: impl Into<String>) -> Self {
        Self::String(v.into())
    }

    /// Create an empty nested tree
    pub fn empty_tree() -> Self {
        Self::Tree(Tree::new())
    }

    // ==================== Type queries ====================

    /// The runtime kind tag.
    pub fn kind(&self) -> ValueKind {
        ValueKind::from_value(self)
    }

    /// Kind name, with the enum kind's own name for enum values.
    pub fn type_name(&self) -> String {
        match self {
            Self::Enum(e) => format!("enum {}", e.kind().name()),
            other => other.kind().name().to_owned(),
        }
    }

    /// Whether this value is a nested tree.
    pub const fn is_tree(&self) -> bool {
        matches!(self, Self::Tree(_))
    }

    // ==================== Exact accessors ====================
    //
    // These never cast; see `Castable` for lenient conversions.

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::UInt(u) => Some(*u),
            _ => None,
        }
    }

    pub const fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub const fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tree_mut(&mut self) -> Option<&mut Tree> {
        match self {
            Self::Tree(t) => Some(t),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Double(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Enum(e) => write!(f, "{e}"),
            Self::Tree(t) => write!(f, "{{{} entries}}", t.len()),
        }
    }
}

// ==================== From impls ====================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::UInt(u64::from(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Self::Enum(v)
    }
}

impl From<Tree> for Value {
    fn from(v: Tree) -> Self {
        Self::Tree(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_picks_the_matching_variant() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(7_i32), Value::Int(7));
        assert_eq!(Value::from(7_u32), Value::UInt(7));
        assert_eq!(Value::from(1.5_f32), Value::Float(1.5));
        assert_eq!(Value::from(1.5), Value::Double(1.5));
        assert_eq!(Value::from("x"), Value::string("x"));
    }

    #[test]
    fn equality_is_exact_not_cast() {
        assert_ne!(Value::Int(1), Value::Double(1.0));
        assert_ne!(Value::Int(1), Value::UInt(1));
        assert_ne!(Value::string("1"), Value::Int(1));
    }

    #[test]
    fn exact_accessors() {
        let v = Value::Int(3);
        assert_eq!(v.as_int(), Some(3));
        assert_eq!(v.as_double(), None);
        assert_eq!(Value::string("a").as_str(), Some("a"));
        assert!(Value::empty_tree().is_tree());
    }

    #[test]
    fn display() {
        assert_eq!(Value::Double(2.5).to_string(), "2.5");
        assert_eq!(Value::string("hi").to_string(), "hi");
        assert_eq!(Value::empty_tree().to_string(), "{0 entries}");
    }
}
