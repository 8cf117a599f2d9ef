//! Construction contract tests: data, defaults, required keys, policy, and
//! the key validation dialect.

use deepconf::{Config, ConfigList, KeyDialect, MissingKeyPolicy};
use serde_json::json;

#[test]
fn test_empty_build() {
    let cfg = Config::builder().build().unwrap();
    assert!(cfg.is_empty());
}

#[test]
fn test_data_only() {
    let cfg = Config::builder().data(json!({"a": 1})).build().unwrap();
    assert_eq!(cfg.get_as::<i64>("a"), Some(1));
}

#[test]
fn test_defaults_only() {
    let cfg = Config::builder()
        .defaults(json!({"a": 1, "d": {"e": 3}}))
        .build()
        .unwrap();
    assert_eq!(cfg.get_as::<i64>("a"), Some(1));
    assert_eq!(cfg.get_as::<i64>("d.e"), Some(3));
}

#[test]
fn test_data_wins_over_defaults() {
    let cfg = Config::builder()
        .defaults(json!({"a": 1, "d": {"e": 3}}))
        .data(json!({"a": 5, "d": {"f": 9}}))
        .build()
        .unwrap();

    // Data wins on scalar conflicts; nested mappings merge key-wise.
    assert_eq!(cfg.get_as::<i64>("a"), Some(5));
    assert_eq!(cfg.get_as::<i64>("d.e"), Some(3));
    assert_eq!(cfg.get_as::<i64>("d.f"), Some(9));
}

#[test]
fn test_defaults_merge_is_recursive() {
    let cfg = Config::builder()
        .defaults(json!({"d": {"f": {"g": 6}, "h": [8, 2]}}))
        .data(json!({"d": {"f": {"w": 4}, "h": [1]}}))
        .build()
        .unwrap();

    assert_eq!(cfg.get_as::<i64>("d.f.g"), Some(6));
    assert_eq!(cfg.get_as::<i64>("d.f.w"), Some(4));
    // Sequences are replaced wholesale, never merged element-wise.
    assert_eq!(cfg.get("d.h").unwrap().as_list().unwrap().len(), 1);
}

#[test]
fn test_non_mapping_inputs_are_rejected() {
    assert!(Config::builder().data(json!([1])).build().is_err());
    assert!(
        Config::builder()
            .defaults(json!([1]))
            .data(json!({"a": 1}))
            .build()
            .is_err()
    );
}

#[test]
fn test_invalid_key_fails_whole_construction() {
    let result = Config::builder()
        .defaults(json!({"ok": 1}))
        .data(json!({"also_ok": {"8a": 2}}))
        .build();
    assert!(result.unwrap_err().is_invalid_key());
}

#[test]
fn test_required_keys_raise_fails_construction() {
    let result = Config::builder()
        .data(json!({"a": 1}))
        .required_keys(["a", "z"])
        .build();
    assert!(result.is_err());
}

#[test]
fn test_required_keys_warn_constructs_anyway() {
    let cfg = Config::builder()
        .data(json!({"a": 1}))
        .required_keys(["a", "z"])
        .if_missing(MissingKeyPolicy::Warn)
        .build()
        .unwrap();
    assert_eq!(cfg.get_as::<i64>("a"), Some(1));
}

#[test]
fn test_dialect_selection() {
    // The strict default rejects leading-underscore keys.
    assert!(Config::builder().data(json!({"_x": 1})).build().is_err());

    let cfg = Config::builder()
        .data(json!({"_x": 1}))
        .dialect(KeyDialect::Lax)
        .build()
        .unwrap();
    assert_eq!(cfg.get_as::<i64>("_x"), Some(1));
    assert_eq!(cfg.dialect(), KeyDialect::Lax);

    // Dunder keys stay rejected in both dialects.
    assert!(
        Config::builder()
            .data(json!({"__x__": 1}))
            .dialect(KeyDialect::Lax)
            .build()
            .is_err()
    );
}

#[test]
fn test_list_builder() {
    let list = ConfigList::builder()
        .required_keys(["_0", "_1.a"])
        .build(json!([1, {"a": 2}]))
        .unwrap();
    assert_eq!(list.len(), 2);

    let result = ConfigList::builder()
        .required_keys(["_5"])
        .build(json!([1]));
    assert!(result.is_err());

    let list = ConfigList::builder()
        .required_keys(["_5"])
        .if_missing(MissingKeyPolicy::Return)
        .build(json!([1]))
        .unwrap();
    assert_eq!(list.len(), 1);
}

#[test]
fn test_list_builder_dialect() {
    let result = ConfigList::builder().build(json!([{"_x": 1}]));
    assert!(result.is_err());

    let list = ConfigList::builder()
        .dialect(KeyDialect::Lax)
        .build(json!([{"_x": 1}]))
        .unwrap();
    assert_eq!(list.get_key("0._x").unwrap(), &deepconf::Value::Int(1));
}
