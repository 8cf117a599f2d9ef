//! Sequence wrapper for configuration trees.
//!
//! `ConfigList` is the positional counterpart of [`Config`]: an ordered
//! sequence of values addressed by integer index, by index-form string
//! segments (`"3"` or `"_3"`), or by dotted keys that recurse into nested
//! containers.

use std::fmt;
use std::ops::{Bound, Index, RangeBounds};
use std::path::Path;

use serde::Serialize;
use serde::de::{Deserializer, SeqAccess, Visitor};

use super::builder::ConfigListBuilder;
use super::errors::ConfigError;
use super::key::{self, KeyDialect};
use super::traits::ConfigNode;
use super::value::Value;

/// Ordered sequence wrapper, 0-indexed.
///
/// In dotted keys a list position is addressed by an underscore-prefixed
/// segment (`_0`, `_1`, ...); the bare digit form is accepted equivalently
/// on lookup.
///
/// # Examples
///
/// ```
/// # use deepconf::{ConfigList, ConfigNode, Value};
/// # use serde_json::json;
/// let list = ConfigList::convert(json!([1, 2, {"a": 3}])).unwrap();
///
/// assert_eq!(list.get(1).unwrap(), &Value::Int(2));
/// assert_eq!(list.get_key("_1").unwrap(), &Value::Int(2));
/// assert_eq!(list.get_key("2.a").unwrap(), &Value::Int(3));
/// assert_eq!(list.deep_keys(), vec!["_0", "_1", "_2", "_2.a"]);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigList {
    pub(crate) items: Vec<Value>,
    pub(crate) dialect: KeyDialect,
}

impl ConfigList {
    /// Creates a new empty sequence wrapper.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            dialect: KeyDialect::default(),
        }
    }

    /// Returns a builder carrying the construction options.
    pub fn builder() -> ConfigListBuilder {
        ConfigListBuilder::new()
    }

    /// Wraps plain raw data whose root is a sequence, validating every
    /// mapping key in the tree.
    pub fn convert(raw: serde_json::Value) -> Result<Self, ConfigError> {
        Self::convert_with(raw, KeyDialect::default())
    }

    /// Like [`ConfigList::convert`] with an explicit key dialect.
    pub fn convert_with(
        raw: serde_json::Value,
        dialect: KeyDialect,
    ) -> Result<Self, ConfigError> {
        let mut value = Value::from(raw);
        if !matches!(value, Value::List(_)) {
            return Err(ConfigError::FormatMismatch {
                expected: "sequence".to_string(),
                actual: value.type_name().to_string(),
            });
        }
        value.validate_keys(dialect)?;
        value.set_dialect_deep(dialect);
        match value {
            Value::List(list) => Ok(list),
            _ => unreachable!("variant checked above"),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the key dialect this wrapper was constructed with.
    pub fn dialect(&self) -> KeyDialect {
        self.dialect
    }

    /// Gets a value by position.
    pub fn get(&self, index: usize) -> Result<&Value, ConfigError> {
        self.items.get(index).ok_or(ConfigError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Gets a value by string key: an index segment in bare (`"3"`) or
    /// underscore (`"_3"`) form, or a dotted key recursing into nested
    /// containers.
    pub fn get_key(&self, key: &str) -> Result<&Value, ConfigError> {
        if let Some(index) = key::parse_index(key) {
            return self.get(index);
        }
        if key::is_proper_deep_key(key) {
            return self.deep_get(key);
        }
        Err(ConfigError::InvalidKey {
            key: key.to_string(),
            reason: "not a sequence index or dotted key".to_string(),
        })
    }

    /// Gets a value by position with automatic type conversion.
    pub fn get_as<'a, T>(&'a self, index: usize) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = ConfigError>,
    {
        let value = self.get(index).ok()?;
        T::try_from(value).ok()
    }

    /// Replaces the value at an existing position, returning the old value.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Value, ConfigError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(ConfigError::IndexOutOfRange { index, len })?;
        let mut value = value.into();
        value.validate_keys(self.dialect)?;
        value.set_dialect_deep(self.dialect);
        Ok(std::mem::replace(slot, value))
    }

    /// Appends a value to the end of the sequence.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<usize, ConfigError> {
        let mut value = value.into();
        value.validate_keys(self.dialect)?;
        value.set_dialect_deep(self.dialect);
        self.items.push(value);
        Ok(self.items.len() - 1)
    }

    /// Inserts a value at a specific position, shifting later elements.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> Result<(), ConfigError> {
        let len = self.items.len();
        if index > len {
            return Err(ConfigError::IndexOutOfRange { index, len });
        }
        let mut value = value.into();
        value.validate_keys(self.dialect)?;
        value.set_dialect_deep(self.dialect);
        self.items.insert(index, value);
        Ok(())
    }

    /// Removes and returns the value at a position.
    pub fn remove(&mut self, index: usize) -> Result<Value, ConfigError> {
        let len = self.items.len();
        if index >= len {
            return Err(ConfigError::IndexOutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    /// Returns a new wrapper over the given sub-range. Out-of-range bounds
    /// are clamped to the sequence length.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> ConfigList {
        let len = self.items.len();
        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&n) => n + 1,
            Bound::Excluded(&n) => n,
            Bound::Unbounded => len,
        }
        .clamp(start, len);
        ConfigList {
            items: self.items[start..end].to_vec(),
            dialect: self.dialect,
        }
    }

    /// Returns the index-form address segments for this level:
    /// `_0, _1, ...`.
    pub fn keys(&self) -> Vec<String> {
        (0..self.items.len()).map(|i| format!("_{i}")).collect()
    }

    /// Returns an iterator over the values in order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    /// Loads a sequence-rooted YAML file with default options.
    pub fn from_yaml(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::builder().load_yaml(path)
    }

    /// Loads a sequence-rooted JSON file with default options.
    pub fn from_json(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::builder().load_json(path)
    }
}

impl ConfigNode for ConfigList {
    fn deep_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for (i, value) in self.items.iter().enumerate() {
            let segment = format!("_{i}");
            keys.push(segment.clone());
            value.collect_deep_keys(&segment, &mut keys);
        }
        keys
    }

    fn deep_get(&self, deep_key: &str) -> Result<&Value, ConfigError> {
        if !key::is_deep_key(deep_key) {
            return Err(ConfigError::InvalidKey {
                key: deep_key.to_string(),
                reason: "not a valid dotted key".to_string(),
            });
        }
        let mut segments = deep_key.split('.');
        let first = segments.next().unwrap_or_default();
        let mut current = match key::parse_index(first) {
            Some(index) => self.get(index)?,
            None => {
                return Err(ConfigError::KeyNotFound {
                    key: deep_key.to_string(),
                });
            }
        };
        for segment in segments {
            current = current
                .descend(segment)
                .map_err(|err| err.for_full_key(deep_key))?;
        }
        Ok(current)
    }

    fn deconvert(&self) -> serde_json::Value {
        serde_json::Value::Array(self.items.iter().map(Value::deconvert).collect())
    }
}

impl Default for ConfigList {
    fn default() -> Self {
        Self::new()
    }
}

// Equality is data equality; the dialect is a construction policy, not data.
impl PartialEq for ConfigList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Index<usize> for ConfigList {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get(index)
            .unwrap_or_else(|err| panic!("{err}"))
    }
}

impl fmt::Display for ConfigList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(&self.deconvert()).map_err(|_| fmt::Error)?;
        write!(f, "{text}")
    }
}

impl From<Vec<Value>> for ConfigList {
    fn from(items: Vec<Value>) -> Self {
        Self {
            items,
            dialect: KeyDialect::default(),
        }
    }
}

impl FromIterator<Value> for ConfigList {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
            dialect: KeyDialect::default(),
        }
    }
}

impl<'a> IntoIterator for &'a ConfigList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for ConfigList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.items.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for ConfigList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = ConfigList;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of configuration values")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<ConfigList, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element::<Value>()? {
                    items.push(item);
                }
                Ok(ConfigList {
                    items,
                    dialect: KeyDialect::default(),
                })
            }
        }

        deserializer.deserialize_seq(ListVisitor)
    }
}
