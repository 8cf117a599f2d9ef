//! Shared operations over the two wrapper types.
//!
//! [`Config`](super::Config) and [`ConfigList`](super::ConfigList) expose
//! the same dotted-key surface: enumeration, lookup, required-key checking,
//! final-segment search, and serialization. `ConfigNode` is the seam that
//! carries those operations; each wrapper supplies enumeration, lookup, and
//! deconversion, and inherits the rest.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::errors::ConfigError;
use super::value::Value;

/// Action to take when a required key is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKeyPolicy {
    /// Fail with [`ConfigError::MissingKeys`].
    #[default]
    Raise,
    /// Emit a warning and return the missing keys.
    Warn,
    /// Quietly return the missing keys.
    Return,
}

impl FromStr for MissingKeyPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raise" => Ok(MissingKeyPolicy::Raise),
            "warn" => Ok(MissingKeyPolicy::Warn),
            "return" => Ok(MissingKeyPolicy::Return),
            other => Err(ConfigError::InvalidPolicy {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MissingKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingKeyPolicy::Raise => write!(f, "raise"),
            MissingKeyPolicy::Warn => write!(f, "warn"),
            MissingKeyPolicy::Return => write!(f, "return"),
        }
    }
}

/// Dotted-key operations shared by the mapping and sequence wrappers.
pub trait ConfigNode: serde::Serialize {
    /// Returns every dotted key reachable from this node, in traversal
    /// order: entries in insertion/positional order, each container's
    /// children immediately after the container's own key.
    fn deep_keys(&self) -> Vec<String>;

    /// Gets a nested value by dotted key.
    fn deep_get(&self, key: &str) -> Result<&Value, ConfigError>;

    /// Walks the wrapped hierarchy back into plain raw data.
    fn deconvert(&self) -> serde_json::Value;

    /// Returns every dotted key paired with its value, in [`deep_keys`]
    /// order.
    ///
    /// [`deep_keys`]: ConfigNode::deep_keys
    fn deep_items(&self) -> Vec<(String, &Value)> {
        self.deep_keys()
            .into_iter()
            .map(|key| {
                let value = self
                    .deep_get(&key)
                    .expect("deep_keys produced an unresolvable key");
                (key, value)
            })
            .collect()
    }

    /// Returns the maximum nesting depth. A flat node has depth 0.
    fn depth(&self) -> usize {
        self.deep_keys()
            .iter()
            .map(|key| key.matches('.').count())
            .max()
            .unwrap_or(0)
    }

    /// Checks that every key in `keys` is present among this node's dotted
    /// keys, applying `policy` to whatever is missing.
    ///
    /// Returns the sorted, deduplicated list of missing keys under the
    /// non-raising policies. The policy check itself cannot fail: an invalid
    /// policy name is rejected when parsing a [`MissingKeyPolicy`], before
    /// this call can be made.
    fn check_required_keys<I, S>(
        &self,
        keys: I,
        policy: MissingKeyPolicy,
    ) -> Result<Vec<String>, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        Self: Sized,
    {
        let present: HashSet<String> = self.deep_keys().into_iter().collect();
        let mut missing: Vec<String> = keys
            .into_iter()
            .map(|key| key.as_ref().to_string())
            .filter(|key| !present.contains(key))
            .collect();
        missing.sort();
        missing.dedup();

        if !missing.is_empty() {
            match policy {
                MissingKeyPolicy::Raise => {
                    return Err(ConfigError::MissingKeys { missing });
                }
                MissingKeyPolicy::Warn => {
                    warn!(?missing, "configuration is missing required keys");
                }
                MissingKeyPolicy::Return => {}
            }
        }
        Ok(missing)
    }

    /// Searches for `key` as the final segment of every dotted key,
    /// returning matches in traversal order.
    ///
    /// Several dotted keys can share a final segment; all of them match.
    fn search(&self, key: &str) -> IndexMap<String, &Value> {
        let mut results = IndexMap::new();
        for (deep_key, value) in self.deep_items() {
            let matched = deep_key.rsplit('.').next().is_some_and(|last| last == key);
            if matched {
                results.insert(deep_key, value);
            }
        }
        results
    }

    /// Like [`search`], but matches any final segment that contains
    /// `pattern` as a substring.
    ///
    /// [`search`]: ConfigNode::search
    fn search_substring(&self, pattern: &str) -> IndexMap<String, &Value> {
        let mut results = IndexMap::new();
        for (deep_key, value) in self.deep_items() {
            let matched = deep_key
                .rsplit('.')
                .next()
                .is_some_and(|last| last.contains(pattern));
            if matched {
                results.insert(deep_key, value);
            }
        }
        results
    }

    /// Like [`search`], but returns only the matched values.
    ///
    /// [`search`]: ConfigNode::search
    fn search_values(&self, key: &str) -> Vec<&Value> {
        self.search(key).into_values().collect()
    }

    /// Serializes to a YAML string.
    fn to_yaml(&self) -> crate::Result<String>
    where
        Self: Sized,
    {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Writes YAML to `path` and reports whether the file exists afterwards.
    fn to_yaml_file(&self, path: impl AsRef<Path>) -> crate::Result<bool>
    where
        Self: Sized,
    {
        let text = serde_yaml::to_string(self)?;
        std::fs::write(path.as_ref(), text)?;
        debug!(path = %path.as_ref().display(), format = "yaml", "wrote configuration file");
        Ok(path.as_ref().exists())
    }

    /// Serializes to a JSON string.
    fn to_json(&self) -> crate::Result<String>
    where
        Self: Sized,
    {
        Ok(serde_json::to_string(self)?)
    }

    /// Writes JSON to `path` and reports whether the file exists afterwards.
    fn to_json_file(&self, path: impl AsRef<Path>) -> crate::Result<bool>
    where
        Self: Sized,
    {
        let text = serde_json::to_string(self)?;
        std::fs::write(path.as_ref(), text)?;
        debug!(path = %path.as_ref().display(), format = "json", "wrote configuration file");
        Ok(path.as_ref().exists())
    }
}
