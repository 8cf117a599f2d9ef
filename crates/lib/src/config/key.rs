//! Key validation and dotted-key syntax.
//!
//! Configuration keys double as navigation segments, so they are held to a
//! stricter standard than arbitrary mapping keys: every key must be a plain
//! identifier, must not use the dunder or private naming forms, and must not
//! collide with an operation name on the wrapper types.
//!
//! Dotted keys address nested values one segment per level. A segment is a
//! mapping key by name or a sequence index written either bare (`"3"`) or
//! underscore-prefixed (`"_3"`); both index forms are accepted uniformly at
//! every level.

use super::errors::ConfigError;

/// Names that can never be used as configuration keys.
///
/// The set is an explicit constant covering the operation surface of
/// [`Config`](super::Config) and [`ConfigList`](super::ConfigList) plus the
/// standard mapping/sequence API names, so that keyed access can never
/// shadow an operation.
pub const RESERVED_KEYS: &[&str] = &[
    "builder",
    "check_required_keys",
    "contains_key",
    "convert",
    "deconvert",
    "deep_get",
    "deep_items",
    "deep_keys",
    "depth",
    "get",
    "get_as",
    "get_key",
    "insert",
    "is_empty",
    "iter",
    "keys",
    "len",
    "push",
    "remove",
    "search",
    "search_substring",
    "search_values",
    "set",
    "set_deep",
    "slice",
    "to_json",
    "to_string",
    "to_toml",
    "to_yaml",
    "update",
    "values",
];

/// Key validation dialect, chosen at construction time.
///
/// The strict dialect additionally rejects keys with a leading underscore,
/// which keeps the underscore prefix free for sequence index segments
/// (`_0`, `_1`, ...) in dotted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyDialect {
    /// Reject dunder (`__x__`) and private (`_x`) key forms.
    #[default]
    Strict,
    /// Reject only the dunder form; leading-underscore keys are allowed.
    Lax,
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_dunder(key: &str) -> bool {
    key.len() >= 4 && key.starts_with("__") && key.ends_with("__")
}

fn is_private(key: &str) -> bool {
    key.starts_with('_')
}

/// Checks a single candidate key against the given dialect and the default
/// reserved set.
pub fn check_key(key: &str, dialect: KeyDialect) -> Result<(), ConfigError> {
    check_key_against(key, dialect, RESERVED_KEYS)
}

/// Checks a single candidate key against the given dialect and an explicit
/// reserved set.
pub fn check_key_against(
    key: &str,
    dialect: KeyDialect,
    reserved: &[&str],
) -> Result<(), ConfigError> {
    if !is_identifier(key) {
        return Err(ConfigError::InvalidKey {
            key: key.to_string(),
            reason: "not a valid identifier (expected [a-zA-Z_][a-zA-Z0-9_]*)".to_string(),
        });
    }
    if is_dunder(key) {
        return Err(ConfigError::InvalidKey {
            key: key.to_string(),
            reason: "matches the dunder naming form (__x__)".to_string(),
        });
    }
    if dialect == KeyDialect::Strict && is_private(key) {
        return Err(ConfigError::InvalidKey {
            key: key.to_string(),
            reason: "matches the private naming form (leading underscore)".to_string(),
        });
    }
    if reserved.contains(&key) {
        return Err(ConfigError::InvalidKey {
            key: key.to_string(),
            reason: "a reserved operation name".to_string(),
        });
    }
    Ok(())
}

/// Checks every candidate key, failing fast on the first invalid one.
pub fn check_keys<'a, I>(keys: I, dialect: KeyDialect) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    for key in keys {
        check_key(key, dialect)?;
    }
    Ok(())
}

/// Like [`check_keys`] with an explicit reserved set.
pub fn check_keys_against<'a, I>(
    keys: I,
    dialect: KeyDialect,
    reserved: &[&str],
) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    for key in keys {
        check_key_against(key, dialect, reserved)?;
    }
    Ok(())
}

/// Returns true if `key` can never be a configuration key: dunder, private
/// per the dialect, or a member of the reserved set.
pub fn is_protected(key: &str, dialect: KeyDialect) -> bool {
    is_dunder(key)
        || (dialect == KeyDialect::Strict && is_private(key))
        || RESERVED_KEYS.contains(&key)
}

/// Returns true if `key` is a syntactically valid dotted key: one or more
/// `\w+` segments joined by dots.
pub fn is_deep_key(key: &str) -> bool {
    !key.is_empty()
        && key.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Returns true if `key` is a dotted key of depth one or more, i.e. it
/// contains at least one dot.
pub fn is_proper_deep_key(key: &str) -> bool {
    key.contains('.') && is_deep_key(key)
}

/// Parses a sequence index segment. Accepts the bare (`"3"`) and
/// underscore-prefixed (`"_3"`) forms equivalently.
pub(crate) fn parse_index(segment: &str) -> Option<usize> {
    let digits = segment.strip_prefix('_').unwrap_or(segment);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
