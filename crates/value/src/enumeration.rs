//! User-defined enumerated kinds.
//!
//! An [`EnumKind`] lists the valid raw codes of an enumeration and, optionally,
//! one string alias per code. Aliases make JSON readable: an enum value is
//! written as its alias when the kind has aliases, otherwise as its raw code.
//!
//! Most code declares enums with [`castable_enum!`](crate::castable_enum),
//! which builds the kind once and implements [`Castable`](crate::Castable):
//!
//! ```rust
//! use paramstore_value::{castable_enum, Castable, Value};
//!
//! castable_enum! {
//!     pub enum Level as "level" {
//!         Low = 0 => "low",
//!         High = 10 => "high",
//!     }
//! }
//!
//! assert_eq!(Level::cast_from(&Value::from("high")), Level::High);
//! assert_eq!(Level::cast_from(&Value::from(10)), Level::High);
//! // Unknown codes fall back to the first case.
//! assert_eq!(Level::cast_from(&Value::from(3)), Level::Low);
//! ```

use core::fmt::{self, Display, Formatter};
use std::sync::Arc;

use crate::cast;
use crate::value::Value;

/// Definition of an enumerated kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumKind {
    name: String,
    codes: Vec<i64>,
    aliases: Vec<String>,
}

impl EnumKind {
    /// Create a kind with the given valid codes. The first code is the default.
    ///
    /// An empty code list is replaced by the single code `0` so every kind
    /// has a default.
    pub fn new(name: impl Into<String>, mut codes: Vec<i64>) -> Self {
        if codes.is_empty() {
            codes.push(0);
        }
        Self {
            name: name.into(),
            codes,
            aliases: Vec::new(),
        }
    }

    /// Attach one alias per code.
    ///
    /// A list whose length differs from the code list is discarded.
    #[must_use]
    pub fn with_aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        let aliases: Vec<String> = aliases.into_iter().map(Into::into).collect();
        if aliases.is_empty() || aliases.len() == self.codes.len() {
            self.aliases = aliases;
        } else {
            tracing::warn!(
                kind = %self.name,
                codes = self.codes.len(),
                aliases = aliases.len(),
                "alias count does not match code count, aliases dropped"
            );
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Valid raw codes, in declaration order.
    pub fn codes(&self) -> &[i64] {
        &self.codes
    }

    /// Aliases, parallel to [`codes`](Self::codes), or empty.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn has_aliases(&self) -> bool {
        !self.aliases.is_empty()
    }

    /// The designated zero case: the first declared code.
    pub fn default_code(&self) -> i64 {
        self.codes[0]
    }

    pub fn contains_code(&self, code: i64) -> bool {
        self.codes.contains(&code)
    }

    /// Alias of `code`, if the kind has aliases and the code is valid.
    pub fn alias_of(&self, code: i64) -> Option<&str> {
        let index = self.codes.iter().position(|c| *c == code)?;
        self.aliases.get(index).map(String::as_str)
    }

    /// Code of `alias`, if present.
    pub fn code_of(&self, alias: &str) -> Option<i64> {
        let index = self.aliases.iter().position(|a| a == alias)?;
        self.codes.get(index).copied()
    }

    /// Whether `value` can be cast into this kind.
    ///
    /// Accepts enum values and finite numeric values whose integer cast is a
    /// valid code, and strings that are one of the aliases.
    pub fn is_castable_from(&self, value: &Value) -> bool {
        self.lookup(value).is_some()
    }

    /// Cast `value` to a code of this kind; never fails.
    ///
    /// Values that are not castable yield [`default_code`](Self::default_code).
    pub fn cast_code(&self, value: &Value) -> i64 {
        self.lookup(value).unwrap_or_else(|| self.default_code())
    }

    /// [`cast_code`](Self::cast_code) wrapped into an [`EnumValue`].
    pub fn cast(self: &Arc<Self>, value: &Value) -> EnumValue {
        EnumValue::new(Arc::clone(self), self.cast_code(value))
    }

    /// Enum value holding the default code.
    pub fn default_value(self: &Arc<Self>) -> EnumValue {
        EnumValue::new(Arc::clone(self), self.default_code())
    }

    fn lookup(&self, value: &Value) -> Option<i64> {
        // Enum values of any kind, including this one, are checked by code.
        match value {
            Value::String(s) => self.code_of(s),
            Value::Bool(_) | Value::Tree(_) => None,
            Value::Float(f) if !f.is_finite() => None,
            Value::Double(d) if !d.is_finite() => None,
            numeric => cast::to_i64(numeric).filter(|code| self.contains_code(*code)),
        }
    }
}

/// A raw code tagged with the kind it belongs to.
#[derive(Debug, Clone)]
pub struct EnumValue {
    kind: Arc<EnumKind>,
    code: i64,
}

impl EnumValue {
    /// Tag `code` with `kind`. The code is not validated; use
    /// [`EnumKind::cast`] for validated construction.
    pub fn new(kind: Arc<EnumKind>, code: i64) -> Self {
        Self { kind, code }
    }

    pub fn kind(&self) -> &Arc<EnumKind> {
        &self.kind
    }

    pub const fn code(&self) -> i64 {
        self.code
    }

    /// The alias of this code, if the kind defines aliases.
    pub fn alias(&self) -> Option<&str> {
        self.kind.alias_of(self.code)
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.kind.name == other.kind.name
    }
}

impl Display for EnumValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.alias() {
            Some(alias) => f.write_str(alias),
            None => write!(f, "{}", self.code),
        }
    }
}

/// Declare a Rust enum backed by an [`EnumKind`].
///
/// Every case needs an explicit code; aliases are optional but must be given
/// for every case or for none. The first case is the default.
///
/// Generates `enum_kind()`, `from_code()`, `code()`, an implementation of
/// [`Castable`](crate::Castable) and `From<Enum> for Value`.
#[macro_export]
macro_rules! castable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal $(=> $alias:literal)? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            const VARIANTS: &'static [Self] = &[$( Self::$variant ),+];

            /// The registered kind for this enum.
            pub fn enum_kind() -> ::std::sync::Arc<$crate::EnumKind> {
                const ALIASES: &[&str] = &[$( $( $alias, )? )+];
                static KIND: ::std::sync::LazyLock<::std::sync::Arc<$crate::EnumKind>> =
                    ::std::sync::LazyLock::new(|| {
                        ::std::sync::Arc::new(
                            $crate::EnumKind::new($kind, ::std::vec![$( $code ),+])
                                .with_aliases(ALIASES.iter().copied()),
                        )
                    });
                ::std::sync::Arc::clone(&KIND)
            }

            /// The case with the given raw code.
            pub fn from_code(code: i64) -> ::core::option::Option<Self> {
                match code {
                    $( c if c == $code => ::core::option::Option::Some(Self::$variant), )+
                    _ => ::core::option::Option::None,
                }
            }

            /// The raw code of this case.
            pub fn code(self) -> i64 {
                match self {
                    $( Self::$variant => $code, )+
                }
            }
        }

        impl $crate::Castable for $name {
            fn kind() -> $crate::ValueKind {
                $crate::ValueKind::Enum
            }

            fn default_value() -> Self {
                Self::VARIANTS[0]
            }

            fn is_castable_from(value: &$crate::Value) -> bool {
                Self::enum_kind().is_castable_from(value)
            }

            fn cast_from(value: &$crate::Value) -> Self {
                Self::from_code(Self::enum_kind().cast_code(value))
                    .unwrap_or_else(<Self as $crate::Castable>::default_value)
            }

            fn into_value(self) -> $crate::Value {
                $crate::Value::Enum($crate::EnumValue::new(Self::enum_kind(), self.code()))
            }
        }

        impl ::core::convert::From<$name> for $crate::Value {
            fn from(v: $name) -> Self {
                $crate::Castable::into_value(v)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Castable;

    castable_enum! {
        enum Color as "color" {
            Red = 1 => "red",
            Green = 2 => "green",
            Blue = 4 => "blue",
        }
    }

    castable_enum! {
        enum Code as "code" {
            Zero = 0,
            Minus = -1,
        }
    }

    fn flags() -> Arc<EnumKind> {
        Arc::new(EnumKind::new("flags", vec![0, 1, 2]))
    }

    #[test]
    fn default_is_first_code() {
        assert_eq!(flags().default_code(), 0);
        assert_eq!(Color::default_value(), Color::Red);
        assert_eq!(EnumKind::new("empty", Vec::new()).default_code(), 0);
    }

    #[test]
    fn mismatched_aliases_are_dropped() {
        let kind = EnumKind::new("k", vec![1, 2]).with_aliases(["only"]);
        assert!(!kind.has_aliases());
    }

    #[test]
    fn castable_from_numeric_codes() {
        let kind = flags();
        assert!(kind.is_castable_from(&Value::Int(2)));
        assert!(kind.is_castable_from(&Value::Double(1.9)));
        assert!(kind.is_castable_from(&Value::UInt(0)));
        assert!(!kind.is_castable_from(&Value::Int(5)));
        assert!(!kind.is_castable_from(&Value::Bool(true)));
        assert!(!kind.is_castable_from(&Value::empty_tree()));
    }

    #[test]
    fn cast_truncates_then_looks_up() {
        let kind = flags();
        assert_eq!(kind.cast_code(&Value::Double(2.7)), 2);
        assert_eq!(kind.cast_code(&Value::Int(9)), 0);
    }

    #[test]
    fn strings_go_through_aliases() {
        let kind = Color::enum_kind();
        assert!(kind.is_castable_from(&Value::from("green")));
        assert!(!kind.is_castable_from(&Value::from("Green")));
        assert!(!kind.is_castable_from(&Value::from("2")));
        assert_eq!(kind.cast_code(&Value::from("blue")), 4);
        assert_eq!(kind.cast_code(&Value::from("purple")), 1);
    }

    #[test]
    fn strings_without_aliases_are_not_castable() {
        assert!(!flags().is_castable_from(&Value::from("1")));
    }

    #[test]
    fn enum_values_of_same_kind_pass_through() {
        let blue = Color::Blue.into_value();
        assert!(Color::is_castable_from(&blue));
        assert_eq!(Color::cast_from(&blue), Color::Blue);
    }

    #[test]
    fn enum_values_of_other_kind_cast_by_code() {
        let other = Value::Enum(EnumValue::new(flags(), 2));
        assert_eq!(Color::cast_from(&other), Color::Green);
    }

    #[test]
    fn same_named_kind_with_foreign_code_is_rejected() {
        let impostor = Arc::new(EnumKind::new("color", vec![1, 2, 4, 99]));
        let stray = Value::Enum(EnumValue::new(impostor, 99));
        assert!(!Color::is_castable_from(&stray));
        assert_eq!(Color::cast_from(&stray), Color::Red);
        assert!(!Color::Blue.into_value().accepts(&stray));
    }

    #[test]
    fn non_finite_floats_are_not_codes() {
        let kind = flags();
        for v in [Value::Double(f64::NAN), Value::Float(f32::NAN), Value::Double(f64::NEG_INFINITY)] {
            assert!(!kind.is_castable_from(&v), "{v:?}");
        }
        assert!(!Code::is_castable_from(&Value::Double(f64::NAN)));
    }

    #[test]
    fn negative_codes() {
        assert_eq!(Code::Minus.code(), -1);
        assert_eq!(Code::from_code(-1), Some(Code::Minus));
        assert_eq!(Code::cast_from(&Value::Int(-1)), Code::Minus);
        assert!(!Code::enum_kind().has_aliases());
    }

    #[test]
    fn display_prefers_alias() {
        assert_eq!(Color::Green.into_value().to_string(), "green");
        assert_eq!(Code::Minus.into_value().to_string(), "-1");
    }

    #[test]
    fn equality_ignores_kind_identity() {
        let a = EnumValue::new(flags(), 1);
        let b = EnumValue::new(flags(), 1);
        assert_eq!(a, b);
        assert_ne!(a, EnumValue::new(flags(), 2));
    }
}
