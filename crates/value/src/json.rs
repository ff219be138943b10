//! JSON mapping for trees.
//!
//! A tree maps onto a JSON object with one member per key; nested trees
//! become nested objects. Enum values are written as their alias when their
//! kind has aliases, otherwise as the raw code. Non-finite floats have no
//! JSON form and are written as `null`.
//!
//! Decoding is the reverse, with three JSON-only shapes folded in:
//! `null` members and elements are skipped (a tree has no null), arrays
//! become trees keyed by element index, and integers that do not fit `i64`
//! are kept as unsigned. Documents nested deeper than
//! [`MAX_PATH_SEGMENTS`] are rejected, since no path could reach their leaves.

use core::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};

use crate::error::DecodeError;
use crate::path::MAX_PATH_SEGMENTS;
use crate::tree::Tree;
use crate::value::Value;

// ==================== Serialize ====================

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::UInt(u) => serializer.serialize_u64(*u),
            Value::Float(f) if f.is_finite() => serializer.serialize_f32(*f),
            Value::Double(d) if d.is_finite() => serializer.serialize_f64(*d),
            Value::Float(_) | Value::Double(_) => serializer.serialize_none(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Enum(e) => match e.alias() {
                Some(alias) => serializer.serialize_str(alias),
                None => serializer.serialize_i64(e.code()),
            },
            Value::Tree(t) => t.serialize(serializer),
        }
    }
}

impl Serialize for Tree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ==================== Deserialize ====================

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TreeVisitor { depth: 0 })
    }
}

/// Depth of a member's path, checked so every decoded leaf stays addressable.
fn child_depth<E: de::Error>(depth: usize) -> Result<usize, E> {
    let child = depth + 1;
    if child > MAX_PATH_SEGMENTS {
        return Err(E::custom(format_args!(
            "document nests deeper than {MAX_PATH_SEGMENTS} levels"
        )));
    }
    Ok(child)
}

struct TreeVisitor {
    depth: usize,
}

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = Tree;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut tree = Tree::new();
        while let Some(key) = map.next_key::<String>()? {
            let depth = child_depth::<A::Error>(self.depth)?;
            if let Some(value) = map.next_value_seed(Slot { depth })? {
                tree.insert(key, value);
            }
        }
        Ok(tree)
    }
}

/// A member or element that may be `null`, at `depth` path segments.
#[derive(Clone, Copy)]
struct Slot {
    depth: usize,
}

impl<'de> DeserializeSeed<'de> for Slot {
    type Value = Option<Value>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Slot {
    type Value = Option<Value>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(Value::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::UInt(v),
        }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(Value::Double(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(Value::string(v)))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(Value::String(v)))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut tree = Tree::new();
        let mut index = 0_usize;
        while let Some(element) = seq.next_element_seed(Slot {
            depth: child_depth::<A::Error>(self.depth)?,
        })? {
            if let Some(element) = element {
                tree.insert(index.to_string(), element);
            }
            index += 1;
        }
        Ok(Some(Value::Tree(tree)))
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        TreeVisitor { depth: self.depth }
            .visit_map(map)
            .map(|tree| Some(Value::Tree(tree)))
    }
}

// ==================== serde_json::Value ====================

impl TryFrom<JsonValue> for Tree {
    type Error = DecodeError;

    fn try_from(json: JsonValue) -> Result<Self, Self::Error> {
        if !json.is_object() {
            return Err(DecodeError::NotAnObject {
                actual: json_type_name(&json),
            });
        }
        Self::deserialize(json).map_err(|err| DecodeError::Invalid {
            message: err.to_string(),
        })
    }
}

impl Tree {
    /// This tree as a `serde_json::Value` object.
    #[must_use]
    pub fn to_json_value(&self) -> JsonValue {
        JsonValue::Object(
            self.iter()
                .map(|(key, value)| (key.to_owned(), value_to_json(value)))
                .collect(),
        )
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::from(*i),
        Value::UInt(u) => JsonValue::from(*u),
        // Widen through the shortest decimal form so 0.1f32 stays 0.1.
        Value::Float(f) => f
            .to_string()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or(JsonValue::Null, JsonValue::Number),
        Value::Double(d) => Number::from_f64(*d).map_or(JsonValue::Null, JsonValue::Number),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Enum(e) => match e.alias() {
            Some(alias) => JsonValue::String(alias.to_owned()),
            None => JsonValue::from(e.code()),
        },
        Value::Tree(t) => t.to_json_value(),
    }
}

fn json_type_name(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
