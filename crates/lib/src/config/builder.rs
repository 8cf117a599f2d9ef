//! Construction options for the wrapper types.
//!
//! Both wrappers accept the same construction contract: optional raw data,
//! optional defaults merged under it (mapping wrapper only), required dotted
//! keys with a missing-key policy, and the key validation dialect. The
//! builders collect those options and finish either from in-memory data
//! (`build`) or from a file (`load_yaml`, `load_json`, `load_toml`).

use std::path::Path;

use serde_json::{Map, Value as RawValue};

use super::errors::ConfigError;
use super::format;
use super::key::KeyDialect;
use super::list::ConfigList;
use super::merge::deep_merge;
use super::traits::{ConfigNode, MissingKeyPolicy};
use super::Config;

/// Builder for [`Config`].
///
/// # Examples
///
/// ```
/// use deepconf::{Config, MissingKeyPolicy};
/// use serde_json::json;
///
/// let cfg = Config::builder()
///     .defaults(json!({"a": 1, "d": {"e": 3}}))
///     .data(json!({"a": 5, "d": {"f": 9}}))
///     .required_keys(["a", "d.e"])
///     .if_missing(MissingKeyPolicy::Raise)
///     .build()
///     .unwrap();
///
/// assert_eq!(cfg.get_as::<i64>("a"), Some(5));
/// assert_eq!(cfg.get_as::<i64>("d.e"), Some(3));
/// assert_eq!(cfg.get_as::<i64>("d.f"), Some(9));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data: Option<RawValue>,
    defaults: Option<RawValue>,
    required_keys: Vec<String>,
    if_missing: MissingKeyPolicy,
    dialect: KeyDialect,
}

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the raw configuration data. Wins over defaults on conflicts.
    pub fn data(mut self, data: impl Into<RawValue>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Sets the defaults merged under the data: nested mappings merge
    /// key-wise, data wins on everything else.
    pub fn defaults(mut self, defaults: impl Into<RawValue>) -> Self {
        self.defaults = Some(defaults.into());
        self
    }

    /// Sets the dotted keys that must be present after construction.
    pub fn required_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the action taken when required keys are absent.
    pub fn if_missing(mut self, policy: MissingKeyPolicy) -> Self {
        self.if_missing = policy;
        self
    }

    /// Sets the key validation dialect.
    pub fn dialect(mut self, dialect: KeyDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Builds the wrapper from the collected options.
    pub fn build(self) -> crate::Result<Config> {
        let merged = match (self.defaults, self.data) {
            (Some(defaults), Some(data)) => {
                let mut base = into_mapping(defaults)?;
                let overlay = into_mapping(data)?;
                deep_merge(&mut base, overlay);
                RawValue::Object(base)
            }
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => RawValue::Object(Map::new()),
        };
        let config = Config::convert_with(merged, self.dialect)?;
        if !self.required_keys.is_empty() {
            config.check_required_keys(&self.required_keys, self.if_missing)?;
        }
        Ok(config)
    }

    /// Loads a mapping-rooted YAML file and builds from it.
    pub fn load_yaml(self, path: impl AsRef<Path>) -> crate::Result<Config> {
        let raw = format::read_yaml(path.as_ref())?;
        self.data(raw).build()
    }

    /// Loads a mapping-rooted JSON file and builds from it.
    pub fn load_json(self, path: impl AsRef<Path>) -> crate::Result<Config> {
        let raw = format::read_json(path.as_ref())?;
        self.data(raw).build()
    }

    /// Loads a TOML file and builds from it.
    pub fn load_toml(self, path: impl AsRef<Path>) -> crate::Result<Config> {
        let raw = format::read_toml(path.as_ref())?;
        self.data(raw).build()
    }
}

/// Builder for [`ConfigList`].
#[derive(Debug, Default)]
pub struct ConfigListBuilder {
    required_keys: Vec<String>,
    if_missing: MissingKeyPolicy,
    dialect: KeyDialect,
}

impl ConfigListBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the dotted keys that must be present after construction.
    pub fn required_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the action taken when required keys are absent.
    pub fn if_missing(mut self, policy: MissingKeyPolicy) -> Self {
        self.if_missing = policy;
        self
    }

    /// Sets the key validation dialect.
    pub fn dialect(mut self, dialect: KeyDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Builds the wrapper from raw sequence-rooted data.
    pub fn build(self, data: impl Into<RawValue>) -> crate::Result<ConfigList> {
        let list = ConfigList::convert_with(data.into(), self.dialect)?;
        if !self.required_keys.is_empty() {
            list.check_required_keys(&self.required_keys, self.if_missing)?;
        }
        Ok(list)
    }

    /// Loads a sequence-rooted YAML file and builds from it.
    pub fn load_yaml(self, path: impl AsRef<Path>) -> crate::Result<ConfigList> {
        let raw = format::read_yaml(path.as_ref())?;
        self.build(raw)
    }

    /// Loads a sequence-rooted JSON file and builds from it.
    pub fn load_json(self, path: impl AsRef<Path>) -> crate::Result<ConfigList> {
        let raw = format::read_json(path.as_ref())?;
        self.build(raw)
    }
}

fn into_mapping(raw: RawValue) -> Result<Map<String, RawValue>, ConfigError> {
    match raw {
        RawValue::Object(map) => Ok(map),
        other => Err(ConfigError::FormatMismatch {
            expected: "mapping".to_string(),
            actual: format::raw_type_name(&other).to_string(),
        }),
    }
}
