//! File-format adapters.
//!
//! Thin read-side helpers for the three supported formats. Each parses a
//! file into the plain raw representation; root-type checking and wrapping
//! happen in the constructors. The write side lives on the wrapper types,
//! since serialization is just serde over the wrapped tree.

use std::fs;
use std::path::Path;

use serde_json::Value as RawValue;
use tracing::debug;

/// Reads and parses a YAML file. Parsing is always safe: no tag
/// constructors beyond the plain data model exist in `serde_yaml`.
pub(crate) fn read_yaml(path: &Path) -> crate::Result<RawValue> {
    let text = fs::read_to_string(path)?;
    let raw = serde_yaml::from_str(&text)?;
    debug!(path = %path.display(), format = "yaml", "loaded configuration file");
    Ok(raw)
}

/// Reads and parses a JSON file.
pub(crate) fn read_json(path: &Path) -> crate::Result<RawValue> {
    let text = fs::read_to_string(path)?;
    let raw = serde_json::from_str(&text)?;
    debug!(path = %path.display(), format = "json", "loaded configuration file");
    Ok(raw)
}

/// Reads and parses a TOML file.
pub(crate) fn read_toml(path: &Path) -> crate::Result<RawValue> {
    let text = fs::read_to_string(path)?;
    let raw = toml::from_str(&text)?;
    debug!(path = %path.display(), format = "toml", "loaded configuration file");
    Ok(raw)
}

/// Names a raw value's type for error messages.
pub(crate) fn raw_type_name(raw: &RawValue) -> &'static str {
    match raw {
        RawValue::Null => "null",
        RawValue::Bool(_) => "bool",
        RawValue::Number(_) => "number",
        RawValue::String(_) => "string",
        RawValue::Array(_) => "sequence",
        RawValue::Object(_) => "mapping",
    }
}
