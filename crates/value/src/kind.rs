//! Value kinds.
//!
//! `ValueKind` is the runtime tag carried by every [`Value`]. Cast decisions
//! are made by matching on it rather than by inspecting concrete Rust types.
//!
//! ```rust
//! use paramstore_value::{Value, ValueKind};
//!
//! let v = Value::from(2.5);
//! assert_eq!(v.kind(), ValueKind::Double);
//! assert!(ValueKind::Double.is_numeric());
//! assert_eq!(ValueKind::from_name("uint"), Some(ValueKind::UInt));
//! ```

use core::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Value;

/// The closed set of kinds a [`Value`] can hold.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Int,
    UInt,
    Float,
    Double,
    String,
    Enum,
    Tree,
}

impl ValueKind {
    /// Every kind, scalar kinds first.
    pub const ALL: [Self; 8] = [
        Self::Bool,
        Self::Int,
        Self::UInt,
        Self::Float,
        Self::Double,
        Self::String,
        Self::Enum,
        Self::Tree,
    ];

    /// Integer and floating point kinds.
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::UInt | Self::Float | Self::Double)
    }

    /// Everything except a nested tree.
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::Tree)
    }

    /// Get the kind of a value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(_) => Self::Bool,
            Value::Int(_) => Self::Int,
            Value::UInt(_) => Self::UInt,
            Value::Float(_) => Self::Float,
            Value::Double(_) => Self::Double,
            Value::String(_) => Self::String,
            Value::Enum(_) => Self::Enum,
            Value::Tree(_) => Self::Tree,
        }
    }

    /// Parse a kind name, accepting a few common spellings.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Some(Self::Bool),
            "int" | "integer" | "i64" => Some(Self::Int),
            "uint" | "unsigned" | "u64" => Some(Self::UInt),
            "float" | "f32" => Some(Self::Float),
            "double" | "f64" => Some(Self::Double),
            "string" | "str" | "text" => Some(Self::String),
            "enum" => Some(Self::Enum),
            "tree" | "object" | "map" => Some(Self::Tree),
            _ => None,
        }
    }

    /// Lowercase name used in messages and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Enum => "enum",
            Self::Tree => "tree",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
