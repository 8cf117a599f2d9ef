//! Error types for configuration tree operations.
//!
//! This module defines structured error types for the configuration wrappers,
//! providing detailed context for key validation failures, lookup misses,
//! required-key checks, and file format mismatches.

use thiserror::Error;

/// Structured error types for configuration operations.
///
/// Each variant captures the context a caller needs to report the failure
/// without re-deriving it: the offending key, the out-of-range index, the
/// sorted list of missing required keys, and so on.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration key failed the identifier, dunder, private, or
    /// reserved-name checks, or a dotted key was syntactically malformed.
    #[error("invalid configuration key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// A direct or dotted lookup addressed a key that does not exist.
    #[error("configuration key '{key}' not found")]
    KeyNotFound { key: String },

    /// A positional lookup addressed an element past the end of a sequence.
    #[error("sequence index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The required-key check ran under the raising policy and keys were
    /// absent. Carries the sorted list of missing dotted keys.
    #[error("configuration is missing required keys: {missing:?}")]
    MissingKeys { missing: Vec<String> },

    /// An unknown missing-key policy name was parsed.
    #[error("invalid missing-key policy '{value}', expected 'raise', 'warn', or 'return'")]
    InvalidPolicy { value: String },

    /// A loaded document's root type does not match the wrapper type being
    /// constructed (for example a sequence-rooted YAML file fed to the
    /// mapping loader).
    #[error("root type mismatch: expected {expected}, found {actual}")]
    FormatMismatch { expected: String, actual: String },

    /// The requested operation is not part of the supported contract.
    #[error("unsupported operation '{operation}': {reason}")]
    UnsupportedOperation { operation: String, reason: String },

    /// A typed accessor was used on a value of a different type.
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl ConfigError {
    /// Check if this error is a key or index lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigError::KeyNotFound { .. } | ConfigError::IndexOutOfRange { .. }
        )
    }

    /// Check if this error came from key validation.
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, ConfigError::InvalidKey { .. })
    }

    /// Check if this error came from the required-key check.
    pub fn is_missing_keys(&self) -> bool {
        matches!(self, ConfigError::MissingKeys { .. })
    }

    /// Check if this error is a root-type mismatch from a loader.
    pub fn is_format_mismatch(&self) -> bool {
        matches!(self, ConfigError::FormatMismatch { .. })
    }

    /// Check if this error is a typed-accessor mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, ConfigError::TypeMismatch { .. })
    }

    /// Get the key if this is a key-related error.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidKey { key, .. } | ConfigError::KeyNotFound { key } => Some(key),
            _ => None,
        }
    }

    /// Get the sorted missing-key list if this is a required-key failure.
    pub fn missing_keys(&self) -> Option<&[String]> {
        match self {
            ConfigError::MissingKeys { missing } => Some(missing),
            _ => None,
        }
    }

    /// Rewrites a per-segment lookup miss to carry the full dotted key the
    /// caller asked for. Index errors keep their positional context.
    pub(crate) fn for_full_key(self, full_key: &str) -> Self {
        match self {
            ConfigError::KeyNotFound { .. } => ConfigError::KeyNotFound {
                key: full_key.to_string(),
            },
            other => other,
        }
    }
}

// Conversion from ConfigError to the main Error type
impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}
