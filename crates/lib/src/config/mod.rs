//! Configuration tree wrappers.
//!
//! This module provides the main public interface for dotted-path
//! configuration access. The [`Config`] type is the mapping wrapper and the
//! primary entry point; [`ConfigList`] is its sequence counterpart, and the
//! two are mutually recursive through [`Value`].
//!
//! # Usage
//!
//! ```
//! use deepconf::{Config, ConfigNode};
//! use serde_json::json;
//!
//! let cfg = Config::convert(json!({
//!     "server": {"host": "localhost", "ports": [8080, 8081]},
//!     "debug": false,
//! }))
//! .unwrap();
//!
//! assert_eq!(cfg.get_as::<&str>("server.host"), Some("localhost"));
//! assert_eq!(cfg.get_as::<i64>("server.ports._1"), Some(8081));
//! assert_eq!(cfg.depth(), 2);
//! ```

use std::fmt;
use std::ops::Index;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::{Deserializer, MapAccess, Visitor};

// Submodules
pub mod builder;
pub mod errors;
pub(crate) mod format;
pub mod key;
pub mod list;
pub mod merge;
pub mod traits;
pub mod value;

// Convenience re-exports for the core types
pub use builder::{ConfigBuilder, ConfigListBuilder};
pub use errors::ConfigError;
pub use key::{KeyDialect, RESERVED_KEYS};
pub use list::ConfigList;
pub use traits::{ConfigNode, MissingKeyPolicy};
pub use value::Value;

/// The mapping wrapper for nested configuration data.
///
/// `Config` owns an insertion-ordered mapping from validated string keys to
/// [`Value`] nodes. Nested mappings and sequences are themselves wrappers,
/// so any value in the tree can be reached through repeated keyed access or
/// through a single dotted key.
///
/// # Core Operations
///
/// - **Lookup**: [`get`](Config::get), [`get_as`](Config::get_as), and the
///   dotted-key operations from [`ConfigNode`]
/// - **Mutation**: [`set`](Config::set), [`remove`](Config::remove),
///   [`update`](Config::update), [`deep_update`](Config::deep_update)
/// - **Conversion**: [`Config::convert`] from plain raw data,
///   [`deconvert`](ConfigNode::deconvert) back to it
/// - **Validation**: key checks at construction and assignment,
///   [`check_required_keys`](ConfigNode::check_required_keys)
///
/// # Examples
///
/// ```
/// # use deepconf::{Config, ConfigNode};
/// # use serde_json::json;
/// let mut cfg = Config::new();
/// cfg.set("name", "alice").unwrap();
/// cfg.set("retries", 3).unwrap();
///
/// assert_eq!(cfg.get_as::<&str>("name"), Some("alice"));
/// assert_eq!(cfg.get_as::<i64>("retries"), Some(3));
///
/// // Keys that would shadow an operation are rejected.
/// assert!(cfg.set("convert", 1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Entries in insertion order
    pub(crate) entries: IndexMap<String, Value>,
    /// Key validation dialect applied to later assignments
    pub(crate) dialect: KeyDialect,
}

impl Config {
    /// Creates a new empty mapping wrapper.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            dialect: KeyDialect::default(),
        }
    }

    /// Returns a builder carrying the construction options: data, defaults,
    /// required keys, missing-key policy, and key dialect.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Wraps plain raw data whose root is a mapping.
    ///
    /// Every key in the tree is validated before the wrapper is returned;
    /// the first invalid key fails the whole construction.
    pub fn convert(raw: serde_json::Value) -> Result<Self, ConfigError> {
        Self::convert_with(raw, KeyDialect::default())
    }

    /// Like [`Config::convert`] with an explicit key dialect. The dialect
    /// is stored and governs later [`set`](Config::set) calls.
    pub fn convert_with(raw: serde_json::Value, dialect: KeyDialect) -> Result<Self, ConfigError> {
        let mut value = Value::from(raw);
        if !matches!(value, Value::Map(_)) {
            return Err(ConfigError::FormatMismatch {
                expected: "mapping".to_string(),
                actual: value.type_name().to_string(),
            });
        }
        value.validate_keys(dialect)?;
        value.set_dialect_deep(dialect);
        match value {
            Value::Map(map) => Ok(map),
            _ => unreachable!("variant checked above"),
        }
    }

    /// Returns the number of direct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the key dialect this wrapper was constructed with.
    pub fn dialect(&self) -> KeyDialect {
        self.dialect
    }

    /// Returns true if `key` resolves, either as a direct key or as a
    /// dotted key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// Gets a value by key.
    ///
    /// A proper dotted key (depth one or more) is resolved through
    /// [`deep_get`](ConfigNode::deep_get); anything else addresses one
    /// mapping level.
    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        if key::is_proper_deep_key(key) {
            return self.deep_get(key);
        }
        self.entries.get(key).ok_or_else(|| ConfigError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Gets a value by key with automatic type conversion.
    ///
    /// Returns `Some(T)` if the key resolves and the value converts;
    /// `None` otherwise.
    ///
    /// ```
    /// # use deepconf::Config;
    /// # use serde_json::json;
    /// let cfg = Config::convert(json!({"a": 1, "d": {"e": "x"}})).unwrap();
    /// assert_eq!(cfg.get_as::<i64>("a"), Some(1));
    /// assert_eq!(cfg.get_as::<&str>("d.e"), Some("x"));
    /// assert_eq!(cfg.get_as::<i64>("d.e"), None);
    /// ```
    pub fn get_as<'a, T>(&'a self, key: &str) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = ConfigError>,
    {
        let value = self.get(key).ok()?;
        T::try_from(value).ok()
    }

    /// Sets a value under a single mapping-level key, returning the
    /// displaced value if the key already existed.
    ///
    /// The key is validated against this wrapper's dialect, and every
    /// mapping key inside `value` is validated as well. Dotted-path
    /// assignment is not supported here; see [`set_deep`](Config::set_deep).
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, ConfigError> {
        let key = key.into();
        key::check_key(&key, self.dialect)?;
        let mut value = value.into();
        value.validate_keys(self.dialect)?;
        value.set_dialect_deep(self.dialect);
        Ok(self.entries.insert(key, value))
    }

    /// Dotted-path assignment. Not supported; always fails with
    /// [`ConfigError::UnsupportedOperation`] rather than guessing an
    /// intermediate-creation semantic.
    pub fn set_deep(&mut self, key: &str, _value: impl Into<Value>) -> Result<(), ConfigError> {
        Err(ConfigError::UnsupportedOperation {
            operation: "set_deep".to_string(),
            reason: format!("dotted-path assignment of '{key}' is not supported"),
        })
    }

    /// Removes a direct key, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Returns an iterator over all key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Returns an iterator over all direct keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Returns an iterator over all direct values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Shallow-merges `other` into this mapping: every direct entry of
    /// `other` overwrites or appends at this level.
    pub fn update(&mut self, other: &Config) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Deep-merges `other` into this mapping: nested mappings merge
    /// key-wise, everything else is overwritten wholesale by `other`.
    pub fn deep_update(&mut self, other: &Config) -> Result<(), ConfigError> {
        let mut base = self.deconvert_map();
        merge::deep_merge(&mut base, other.deconvert_map());
        *self = Config::convert_with(serde_json::Value::Object(base), self.dialect)?;
        Ok(())
    }

    /// Deconverts into the plain raw mapping form.
    pub(crate) fn deconvert_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.deconvert()))
            .collect()
    }

    /// Loads a mapping-rooted YAML file with default options.
    pub fn from_yaml(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::builder().load_yaml(path)
    }

    /// Loads a mapping-rooted JSON file with default options.
    pub fn from_json(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::builder().load_json(path)
    }

    /// Loads a TOML file with default options. TOML documents are always
    /// mapping-rooted.
    pub fn from_toml(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::builder().load_toml(path)
    }

    /// Serializes to a TOML string. There is no sequence counterpart since
    /// TOML has no top-level sequence form.
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Writes TOML to `path` and reports whether the file exists afterwards.
    pub fn to_toml_file(&self, path: impl AsRef<Path>) -> crate::Result<bool> {
        let text = toml::to_string(self)?;
        std::fs::write(path.as_ref(), text)?;
        tracing::debug!(path = %path.as_ref().display(), format = "toml", "wrote configuration file");
        Ok(path.as_ref().exists())
    }
}

impl ConfigNode for Config {
    fn deep_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for (k, v) in &self.entries {
            keys.push(k.clone());
            v.collect_deep_keys(k, &mut keys);
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
        let mut current = self
            .entries
            .get(first)
            .ok_or_else(|| ConfigError::KeyNotFound {
                key: deep_key.to_string(),
            })?;
        for segment in segments {
            current = current
                .descend(segment)
                .map_err(|err| err.for_full_key(deep_key))?;
        }
        Ok(current)
    }

    fn deconvert(&self) -> serde_json::Value {
        serde_json::Value::Object(self.deconvert_map())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

// Equality is data equality; the dialect is a construction policy, not data.
impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Index<&str> for Config {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(&self.deconvert()).map_err(|_| fmt::Error)?;
        write!(f, "{text}")
    }
}

impl Serialize for Config {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.entries.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = Config;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping of configuration values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Config, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = IndexMap::new();
                while let Some((k, v)) = map.next_entry::<String, Value>()? {
                    entries.insert(k, v);
                }
                Ok(Config {
                    entries,
                    dialect: KeyDialect::default(),
                })
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}
