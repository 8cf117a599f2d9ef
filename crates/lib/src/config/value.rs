//! Value types for configuration trees.
//!
//! This module provides the Value enum that represents all possible values
//! that can be stored within a configuration tree. Values can be either leaf
//! values (scalars like integers, strings, booleans) or branch values
//! (nested mappings and sequences).

use std::fmt;

use serde::Serialize;
use serde::de::{MapAccess, SeqAccess, Visitor};

use super::errors::ConfigError;
use super::key::{self, KeyDialect};
use super::list::ConfigList;
use super::Config;

/// Values that can be stored in a configuration tree.
///
/// `Value` is the unified node type for the wrapper hierarchy. Leaf values
/// carry scalar data; branch values contain the two container wrappers and
/// make the tree mutually recursive.
///
/// # Direct Comparisons
///
/// `Value` implements `PartialEq` with primitive types for ergonomic
/// assertions:
///
/// ```
/// # use deepconf::Value;
/// let text = Value::Text("hello".to_string());
/// let number = Value::Int(42);
///
/// assert!(text == "hello");
/// assert!(number == 42);
/// assert!(42 == number);
/// assert!(!(text == 42));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Leaf values (terminal nodes)
    /// Null/empty value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// Text string value
    Text(String),

    // Branch values (can contain other nodes)
    /// Nested mapping wrapper
    Map(Config),
    /// Nested sequence wrapper
    List(ConfigList),
}

impl Value {
    /// Returns true if this is a leaf value (terminal node)
    pub fn is_scalar(&self) -> bool {
        !self.is_container()
    }

    /// Returns true if this is a branch value (can contain other nodes)
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Map(_) | Value::List(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Map(_) => "mapping",
            Value::List(_) => "sequence",
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float. Integers widen losslessly where
    /// possible.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Attempts to convert to a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to a mapping wrapper (immutable reference)
    pub fn as_map(&self) -> Option<&Config> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable mapping wrapper reference
    pub fn as_map_mut(&mut self) -> Option<&mut Config> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to convert to a sequence wrapper (immutable reference)
    pub fn as_list(&self) -> Option<&ConfigList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable sequence wrapper reference
    pub fn as_list_mut(&mut self) -> Option<&mut ConfigList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Gets a nested value by dotted key, traversing one level per segment.
    ///
    /// ```
    /// # use deepconf::Value;
    /// # use serde_json::json;
    /// let value = Value::from(json!({"d": {"h": [8, {"i": 5}]}}));
    /// assert_eq!(value.deep_get("d.h._1.i").unwrap(), &Value::Int(5));
    /// assert_eq!(value.deep_get("d.h.1.i").unwrap(), &Value::Int(5));
    /// ```
    pub fn deep_get(&self, deep_key: &str) -> Result<&Value, ConfigError> {
        if !key::is_deep_key(deep_key) {
            return Err(ConfigError::InvalidKey {
                key: deep_key.to_string(),
                reason: "not a valid dotted key".to_string(),
            });
        }
        let mut current = self;
        for segment in deep_key.split('.') {
            current = current
                .descend(segment)
                .map_err(|err| err.for_full_key(deep_key))?;
        }
        Ok(current)
    }

    /// Resolves one address segment against this value: a mapping key by
    /// name, or a sequence index in bare or underscore-prefixed form.
    pub(crate) fn descend(&self, segment: &str) -> Result<&Value, ConfigError> {
        match self {
            Value::Map(map) => map.entries.get(segment).ok_or_else(|| ConfigError::KeyNotFound {
                key: segment.to_string(),
            }),
            Value::List(list) => match key::parse_index(segment) {
                Some(index) => list.get(index),
                None => Err(ConfigError::KeyNotFound {
                    key: segment.to_string(),
                }),
            },
            _ => Err(ConfigError::KeyNotFound {
                key: segment.to_string(),
            }),
        }
    }

    /// Appends every dotted key reachable below `prefix` to `keys`, in
    /// traversal order: container entries in insertion/positional order,
    /// children immediately after their parent.
    pub(crate) fn collect_deep_keys(&self, prefix: &str, keys: &mut Vec<String>) {
        match self {
            Value::Map(map) => {
                for (k, v) in &map.entries {
                    let child = format!("{prefix}.{k}");
                    keys.push(child.clone());
                    v.collect_deep_keys(&child, keys);
                }
            }
            Value::List(list) => {
                for (i, v) in list.items.iter().enumerate() {
                    let child = format!("{prefix}._{i}");
                    keys.push(child.clone());
                    v.collect_deep_keys(&child, keys);
                }
            }
            _ => {}
        }
    }

    /// Checks every mapping key in this subtree against the dialect.
    pub(crate) fn validate_keys(&self, dialect: KeyDialect) -> Result<(), ConfigError> {
        match self {
            Value::Map(map) => {
                for (k, v) in &map.entries {
                    key::check_key(k, dialect)?;
                    v.validate_keys(dialect)?;
                }
                Ok(())
            }
            Value::List(list) => {
                for v in &list.items {
                    v.validate_keys(dialect)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Propagates a dialect choice to every container in this subtree.
    pub(crate) fn set_dialect_deep(&mut self, dialect: KeyDialect) {
        match self {
            Value::Map(map) => {
                map.dialect = dialect;
                for v in map.entries.values_mut() {
                    v.set_dialect_deep(dialect);
                }
            }
            Value::List(list) => {
                list.dialect = dialect;
                for v in &mut list.items {
                    v.set_dialect_deep(dialect);
                }
            }
            _ => {}
        }
    }

    /// Walks the wrapped hierarchy back into plain raw data.
    pub fn deconvert(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::Number((*n).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Map(map) => serde_json::Value::Object(map.deconvert_map()),
            Value::List(list) => {
                serde_json::Value::Array(list.items.iter().map(Value::deconvert).collect())
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Map(map) => write!(f, "{map}"),
            Value::List(list) => write!(f, "{list}"),
        }
    }
}

// The conversion engine: plain raw data in, wrapped hierarchy out.
// Validation is a separate concern handled by the constructing container.
impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => Value::List(ConfigList {
                items: items.into_iter().map(Value::from).collect(),
                dialect: KeyDialect::default(),
            }),
            serde_json::Value::Object(map) => Value::Map(Config {
                entries: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
                dialect: KeyDialect::default(),
            }),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        value.deconvert()
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Config> for Value {
    fn from(value: Config) -> Self {
        Value::Map(value)
    }
}

impl From<ConfigList> for Value {
    fn from(value: ConfigList) -> Self {
        Value::List(value)
    }
}

// TryFrom implementations backing the typed accessors
impl TryFrom<&Value> for String {
    type Error = ConfigError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            _ => Err(ConfigError::TypeMismatch {
                expected: "text".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = ConfigError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(ConfigError::TypeMismatch {
                expected: "text".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = ConfigError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(*n),
            _ => Err(ConfigError::TypeMismatch {
                expected: "int".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = ConfigError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.as_float().ok_or_else(|| ConfigError::TypeMismatch {
            expected: "float".to_string(),
            actual: value.type_name().to_string(),
        })
    }
}

impl TryFrom<&Value> for bool {
    type Error = ConfigError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(ConfigError::TypeMismatch {
                expected: "bool".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl TryFrom<&Value> for Config {
    type Error = ConfigError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Map(map) => Ok(map.clone()),
            _ => Err(ConfigError::TypeMismatch {
                expected: "mapping".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl TryFrom<&Value> for ConfigList {
    type Error = ConfigError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(list) => Ok(list.clone()),
            _ => Err(ConfigError::TypeMismatch {
                expected: "sequence".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

// PartialEq implementations for comparing Value with other types
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        match self {
            Value::Text(s) => s == other,
            _ => false,
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        match self {
            Value::Text(s) => s == other,
            _ => false,
        }
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        match self {
            Value::Int(n) => n == other,
            _ => false,
        }
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        match self {
            Value::Int(n) => *n == *other as i64,
            _ => false,
        }
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        match self {
            Value::Float(f) => f == other,
            _ => false,
        }
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        match self {
            Value::Bool(b) => b == other,
            _ => false,
        }
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for f64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

// Serialize as the plain data tree, so every file format sees ordinary
// scalars, mappings, and sequences rather than a tagged enum.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Map(map) => map.serialize(serializer),
            Value::List(list) => list.serialize(serializer),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a configuration value")
            }

            fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
                Ok(Value::Int(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
                Ok(match i64::try_from(v) {
                    Ok(i) => Value::Int(i),
                    Err(_) => Value::Float(v as f64),
                })
            }

            fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
                Ok(Value::Float(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Value, E> {
                Ok(Value::Text(v.to_string()))
            }

            fn visit_string<E>(self, v: String) -> Result<Value, E> {
                Ok(Value::Text(v))
            }

            fn visit_unit<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                serde::Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element::<Value>()? {
                    items.push(item);
                }
                Ok(Value::List(ConfigList {
                    items,
                    dialect: KeyDialect::default(),
                }))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = indexmap::IndexMap::new();
                while let Some((k, v)) = map.next_entry::<String, Value>()? {
                    entries.insert(k, v);
                }
                Ok(Value::Map(Config {
                    entries,
                    dialect: KeyDialect::default(),
                }))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
