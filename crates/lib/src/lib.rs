//!
//! Deepconf: dotted-path navigation over nested configuration data.
//! This library wraps parsed YAML, JSON, or TOML content in recursive
//! containers that can be read one level at a time or through a single
//! dotted key.
//!
//! ## Core Concepts
//!
//! * **Config (`config::Config`)**: The mapping wrapper. Owns an
//!   insertion-ordered set of validated keys, dotted-key lookup,
//!   required-key checking, merging, and serialization.
//! * **ConfigList (`config::ConfigList`)**: The sequence wrapper. Positions
//!   are addressed by integer index or by `_0`-style dotted-key segments.
//! * **Value (`config::Value`)**: The node type tying the two wrappers
//!   together: scalar leaves plus nested mapping/sequence branches.
//! * **ConfigNode (`config::ConfigNode`)**: The trait carrying the shared
//!   dotted-key surface of both wrappers.
//! * **Key validation (`config::key`)**: Configuration keys must be plain
//!   identifiers, never dunder/private forms, and never collide with an
//!   operation name; a dialect switch controls the leading-underscore rule.
//!
//! ## Example
//!
//! ```
//! use deepconf::{Config, ConfigNode};
//! use serde_json::json;
//!
//! let cfg = Config::builder()
//!     .defaults(json!({"log": {"level": "info"}}))
//!     .data(json!({"log": {"file": "out.log"}, "workers": 4}))
//!     .build()?;
//!
//! assert_eq!(cfg.get_as::<&str>("log.level"), Some("info"));
//! assert_eq!(cfg.get_as::<&str>("log.file"), Some("out.log"));
//! assert!(cfg.deep_keys().contains(&"log.level".to_string()));
//! # Ok::<(), deepconf::Error>(())
//! ```

pub mod config;

/// Re-export the core types for easier access.
pub use config::{
    Config, ConfigBuilder, ConfigError, ConfigList, ConfigListBuilder, ConfigNode, KeyDialect,
    MissingKeyPolicy, Value,
};

/// Result type used throughout the deepconf library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the deepconf library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Yaml(_) => "yaml",
            Error::TomlParse(_) | Error::TomlSerialize(_) => "toml",
            Error::Config(_) => "config",
        }
    }

    /// Check if this error indicates a key or index was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Config(err) => err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error came from configuration key validation.
    pub fn is_invalid_key(&self) -> bool {
        match self {
            Error::Config(err) => err.is_invalid_key(),
            _ => false,
        }
    }

    /// Check if this error is a root-type mismatch from a loader.
    pub fn is_format_mismatch(&self) -> bool {
        match self {
            Error::Config(err) => err.is_format_mismatch(),
            _ => false,
        }
    }
}
