//! Lenient, total casting between value kinds.
//!
//! Casting never fails: a source that cannot be represented in the target
//! kind resolves to the target's default (`0`, `0.0`, `""`, `false`, the
//! enum's first case). The predicate side (`is_castable_from`) and the cast
//! side (`cast_from`) are derived from the same conversion table, so a value
//! is castable exactly when the table produces a result for it.
//!
//! | target | accepts |
//! |---|---|
//! | numeric | any numeric kind, `bool` (0/1), enum codes, strings that parse as a number |
//! | `bool` | any finite numeric value (non-zero is `true`), enum codes, `"true"`/`"false"`/`"1"`/`"0"` in any case |
//! | `string` | every scalar |
//! | enum | see [`EnumKind::is_castable_from`](crate::EnumKind::is_castable_from) |
//! | tree | trees only |

use crate::kind::ValueKind;
use crate::tree::Tree;
use crate::value::Value;

/// A Rust type that can be read from and written to a [`Tree`] with casting.
///
/// Implemented for `bool`, `i32`, `i64`, `u32`, `u64`, `f32`, `f64`,
/// `String`, [`Tree`], and enums declared with
/// [`castable_enum!`](crate::castable_enum).
pub trait Castable: Sized {
    /// The value kind this type is stored as.
    fn kind() -> ValueKind;

    /// The zero-equivalent returned when nothing better is available.
    fn default_value() -> Self;

    /// Whether `value` can be represented as this type.
    fn is_castable_from(value: &Value) -> bool;

    /// Cast `value`; non-castable input yields [`default_value`](Self::default_value).
    fn cast_from(value: &Value) -> Self;

    /// Wrap into a [`Value`] of [`kind`](Self::kind).
    fn into_value(self) -> Value;

    /// Cast `value`, or return `fallback` when it is not castable.
    fn cast_or(value: &Value, fallback: Self) -> Self {
        if Self::is_castable_from(value) {
            Self::cast_from(value)
        } else {
            fallback
        }
    }
}

// ==================== Conversion table ====================

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Float to integer, truncating toward zero and saturating at the bounds.
fn float_to_i64(x: f64) -> i64 {
    x as i64
}

fn float_to_u64(x: f64) -> u64 {
    x as u64
}

pub(crate) fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Int(i) => Some(*i),
        Value::UInt(u) => Some(i64::try_from(*u).unwrap_or(i64::MAX)),
        Value::Float(f) => Some(float_to_i64(f64::from(*f))),
        Value::Double(d) => Some(float_to_i64(*d)),
        // Exact integer text keeps full precision; anything else goes through f64.
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| parse_number(s).map(float_to_i64)),
        Value::Enum(e) => Some(e.code()),
        Value::Tree(_) => None,
    }
}

pub(crate) fn to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Bool(b) => Some(u64::from(*b)),
        Value::Int(i) => Some(u64::try_from(*i).unwrap_or(0)),
        Value::UInt(u) => Some(*u),
        Value::Float(f) => Some(float_to_u64(f64::from(*f))),
        Value::Double(d) => Some(float_to_u64(*d)),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .ok()
            .or_else(|| parse_number(s).map(float_to_u64)),
        Value::Enum(e) => Some(u64::try_from(e.code()).unwrap_or(0)),
        Value::Tree(_) => None,
    }
}

pub(crate) fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Int(i) => Some(*i as f64),
        Value::UInt(u) => Some(*u as f64),
        Value::Float(f) => Some(f64::from(*f)),
        Value::Double(d) => Some(*d),
        Value::String(s) => parse_number(s),
        Value::Enum(e) => Some(e.code() as f64),
        Value::Tree(_) => None,
    }
}

pub(crate) fn to_f32(value: &Value) -> Option<f32> {
    match value {
        Value::Float(f) => Some(*f),
        // Finite doubles saturate at the f32 bounds instead of overflowing to infinity.
        other => {
            to_f64(other).map(|x| x.clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32)
        }
    }
}

pub(crate) fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(i) => Some(*i != 0),
        Value::UInt(u) => Some(*u != 0),
        Value::Float(f) => f.is_finite().then_some(*f != 0.0),
        Value::Double(d) => d.is_finite().then_some(*d != 0.0),
        Value::String(s) => parse_bool(s),
        Value::Enum(e) => Some(e.code() != 0),
        Value::Tree(_) => None,
    }
}

pub(crate) fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Tree(_) => None,
        scalar => Some(scalar.to_string()),
    }
}

impl ValueKind {
    /// Cast `value` into this kind, or `None` when it is not castable.
    ///
    /// Returns `None` for [`ValueKind::Enum`]: casting into an enum needs the
    /// enum's definition, see [`Value::recast`].
    pub fn try_cast(&self, value: &Value) -> Option<Value> {
        if *self == value.kind() && *self != Self::Enum {
            return Some(value.clone());
        }
        match self {
            Self::Bool => to_bool(value).map(Value::Bool),
            Self::Int => to_i64(value).map(Value::Int),
            Self::UInt => to_u64(value).map(Value::UInt),
            Self::Float => to_f32(value).map(Value::Float),
            Self::Double => to_f64(value).map(Value::Double),
            Self::String => to_string(value).map(Value::String),
            Self::Enum | Self::Tree => None,
        }
    }

    /// The zero-equivalent value of this kind; `None` for enums.
    pub fn default_value(&self) -> Option<Value> {
        match self {
            Self::Bool => Some(Value::Bool(false)),
            Self::Int => Some(Value::Int(0)),
            Self::UInt => Some(Value::UInt(0)),
            Self::Float => Some(Value::Float(0.0)),
            Self::Double => Some(Value::Double(0.0)),
            Self::String => Some(Value::String(String::new())),
            Self::Tree => Some(Value::empty_tree()),
            Self::Enum => None,
        }
    }
}

impl Value {
    /// Whether this value's kind accepts `other` on assignment.
    ///
    /// The stored value defines the kind: an enum value consults its enum
    /// kind, a tree only accepts another tree.
    pub fn accepts(&self, other: &Value) -> bool {
        match self {
            Self::Enum(e) => e.kind().is_castable_from(other),
            Self::Tree(_) => other.is_tree(),
            scalar => scalar.kind().try_cast(other).is_some(),
        }
    }

    /// `other` cast into this value's kind.
    ///
    /// Falls back to the kind's default when `other` is not castable.
    pub fn recast(&self, other: &Value) -> Value {
        match self {
            Self::Enum(e) => Value::Enum(e.kind().cast(other)),
            Self::Tree(_) => match other {
                Self::Tree(t) => Value::Tree(t.clone()),
                _ => Value::empty_tree(),
            },
            scalar => {
                let kind = scalar.kind();
                kind.try_cast(other)
                    .or_else(|| kind.default_value())
                    .unwrap_or_else(|| scalar.clone())
            }
        }
    }
}

// ==================== Castable for native types ====================

macro_rules! impl_castable {
    ($ty:ty, $kind:ident, $convert:path) => {
        impl Castable for $ty {
            fn kind() -> ValueKind {
                ValueKind::$kind
            }

            fn default_value() -> Self {
                <$ty>::default()
            }

            fn is_castable_from(value: &Value) -> bool {
                $convert(value).is_some()
            }

            fn cast_from(value: &Value) -> Self {
                $convert(value).unwrap_or_default()
            }

            fn into_value(self) -> Value {
                Value::from(self)
            }
        }
    };
}

fn to_i32(value: &Value) -> Option<i32> {
    to_i64(value).map(|x| i32::try_from(x).unwrap_or(if x < 0 { i32::MIN } else { i32::MAX }))
}

fn to_u32(value: &Value) -> Option<u32> {
    to_u64(value).map(|x| u32::try_from(x).unwrap_or(u32::MAX))
}

impl_castable!(bool, Bool, to_bool);
impl_castable!(i64, Int, to_i64);
impl_castable!(i32, Int, to_i32);
impl_castable!(u64, UInt, to_u64);
impl_castable!(u32, UInt, to_u32);
impl_castable!(f64, Double, to_f64);
impl_castable!(f32, Float, to_f32);
impl_castable!(String, String, to_string);

impl Castable for Tree {
    fn kind() -> ValueKind {
        ValueKind::Tree
    }

    fn default_value() -> Self {
        Self::new()
    }

    fn is_castable_from(value: &Value) -> bool {
        value.is_tree()
    }

    fn cast_from(value: &Value) -> Self {
        value.as_tree().cloned().unwrap_or_default()
    }

    fn into_value(self) -> Value {
        Value::Tree(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_to_numeric_truncates_toward_zero() {
        assert_eq!(i64::cast_from(&Value::Double(2.9)), 2);
        assert_eq!(i64::cast_from(&Value::Double(-2.9)), -2);
        assert_eq!(u64::cast_from(&Value::Float(7.5)), 7);
        assert_eq!(f64::cast_from(&Value::Int(3)), 3.0);
    }

    #[test]
    fn out_of_range_saturates() {
        assert_eq!(u64::cast_from(&Value::Int(-5)), 0);
        assert_eq!(i64::cast_from(&Value::UInt(u64::MAX)), i64::MAX);
        assert_eq!(i32::cast_from(&Value::Int(i64::MIN)), i32::MIN);
        assert_eq!(u32::cast_from(&Value::UInt(u64::MAX)), u32::MAX);
        assert_eq!(i64::cast_from(&Value::Double(f64::NAN)), 0);
    }

    #[test]
    fn strings_parse_as_double_then_narrow() {
        assert_eq!(i64::cast_from(&Value::from("1000.5")), 1000);
        assert_eq!(i64::cast_from(&Value::from(" 222 ")), 222);
        assert_eq!(u64::cast_from(&Value::from("1e3")), 1000);
        assert_eq!(f64::cast_from(&Value::from("2.25")), 2.25);
        assert_eq!(i64::cast_from(&Value::from("9007199254740993")), 9_007_199_254_740_993);
    }

    #[test]
    fn unparsable_strings_fall_back_to_default() {
        assert!(!i64::is_castable_from(&Value::from("Test")));
        assert_eq!(i64::cast_from(&Value::from("Test")), 0);
        assert!(!f64::is_castable_from(&Value::from("")));
        assert!(!f64::is_castable_from(&Value::from("inf")));
        assert_eq!(i64::cast_or(&Value::from("Test"), 10), 10);
    }

    #[test]
    fn bool_from_strings() {
        for s in ["true", "TRUE", "1", " True "] {
            assert!(bool::cast_from(&Value::from(s)), "{s}");
        }
        for s in ["false", "False", "0"] {
            assert!(bool::is_castable_from(&Value::from(s)), "{s}");
            assert!(!bool::cast_from(&Value::from(s)), "{s}");
        }
        assert!(!bool::is_castable_from(&Value::from("yes")));
    }

    #[test]
    fn bool_and_integers() {
        assert_eq!(i64::cast_from(&Value::Bool(true)), 1);
        assert_eq!(u64::cast_from(&Value::Bool(false)), 0);
        assert!(bool::cast_from(&Value::Int(-3)));
        assert!(!bool::cast_from(&Value::UInt(0)));
        assert!(bool::cast_from(&Value::Double(0.5)));
    }

    #[test]
    fn non_finite_floats_are_not_booleans() {
        for v in [Value::Double(f64::NAN), Value::Double(f64::INFINITY), Value::Float(f32::NAN)] {
            assert!(!bool::is_castable_from(&v), "{v:?}");
            assert!(!bool::cast_from(&v), "{v:?}");
        }
        assert!(!Value::Bool(true).accepts(&Value::Double(f64::NAN)));
    }

    #[test]
    fn long_numeric_text_still_parses() {
        let tiny = format!("0.{}1", "0".repeat(64));
        assert!(f64::is_castable_from(&Value::String(tiny.clone())));
        assert_eq!(f64::cast_from(&Value::String(tiny)), 1.0e-65);

        let text = String::cast_from(&Value::Double(1.0e70));
        assert!(text.len() > 64);
        assert_eq!(f64::cast_from(&Value::String(text)), 1.0e70);
    }

    #[test]
    fn doubles_narrow_to_f32_without_overflow() {
        assert_eq!(f32::cast_from(&Value::Double(1.0e300)), f32::MAX);
        assert_eq!(f32::cast_from(&Value::Double(-1.0e300)), f32::MIN);
        assert_eq!(f32::cast_from(&Value::from("1e39")), f32::MAX);
        assert_eq!(Value::Float(0.0).recast(&Value::Double(1.0e300)), Value::Float(f32::MAX));
        assert!(f32::cast_from(&Value::Double(f64::NAN)).is_nan());
    }

    #[test]
    fn strings_accept_every_scalar() {
        assert_eq!(String::cast_from(&Value::Int(42)), "42");
        assert_eq!(String::cast_from(&Value::Double(10.0)), "10");
        assert_eq!(String::cast_from(&Value::Double(2.5)), "2.5");
        assert_eq!(String::cast_from(&Value::Bool(true)), "true");
        assert!(!String::is_castable_from(&Value::empty_tree()));
    }

    #[test]
    fn trees_only_from_trees() {
        assert!(Tree::is_castable_from(&Value::empty_tree()));
        assert!(!Tree::is_castable_from(&Value::Int(1)));
        assert!(!i64::is_castable_from(&Value::empty_tree()));
        assert_eq!(Tree::cast_from(&Value::Int(1)), Tree::new());
    }

    #[test]
    fn same_kind_passes_through() {
        let v = Value::Double(1.25);
        assert_eq!(ValueKind::Double.try_cast(&v), Some(v.clone()));
        assert_eq!(f64::cast_from(&v), 1.25);
    }

    #[test]
    fn recast_keeps_the_stored_kind() {
        let stored = Value::Int(1);
        assert!(stored.accepts(&Value::Double(2.5)));
        assert_eq!(stored.recast(&Value::Double(2.5)), Value::Int(2));

        let stored = Value::Double(300.0);
        assert_eq!(stored.recast(&Value::Int(10)), Value::Double(10.0));

        let stored = Value::string("x");
        assert_eq!(stored.recast(&Value::UInt(5)), Value::string("5"));
    }

    #[test]
    fn recast_of_non_castable_is_default() {
        let stored = Value::Int(7);
        assert!(!stored.accepts(&Value::from("abc")));
        assert_eq!(stored.recast(&Value::from("abc")), Value::Int(0));
    }

    #[test]
    fn kind_tags_of_natives() {
        assert_eq!(<i32 as Castable>::kind(), ValueKind::Int);
        assert_eq!(<u32 as Castable>::kind(), ValueKind::UInt);
        assert_eq!(<f32 as Castable>::kind(), ValueKind::Float);
        assert_eq!(3_i32.into_value(), Value::Int(3));
    }
}
