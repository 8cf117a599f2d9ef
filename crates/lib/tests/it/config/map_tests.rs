//! Mapping wrapper tests: lookup dispatch, assignment, key validation, and
//! shallow/deep update semantics.

use deepconf::{Config, ConfigError, Value};
use serde_json::json;

use super::helpers::nested_data;

#[test]
fn test_get_direct_and_dotted() {
    let cfg = Config::convert(nested_data()).unwrap();

    assert_eq!(cfg.get("a").unwrap(), &Value::Int(1));
    assert_eq!(cfg.get("d.e").unwrap(), &Value::Int(3));
    assert_eq!(cfg.get("d.f.g").unwrap(), &Value::Int(6));

    // Sequence segments work in both index forms at any level.
    assert_eq!(cfg.get("d.h._0").unwrap(), &Value::Int(8));
    assert_eq!(cfg.get("d.h.0").unwrap(), &Value::Int(8));
    assert_eq!(cfg.get("d.h._2.i").unwrap(), &Value::Int(5));
    assert_eq!(cfg.get("d.h.2.j").unwrap(), &Value::Int(9));
}

#[test]
fn test_get_missing_keys() {
    let cfg = Config::convert(nested_data()).unwrap();

    assert!(matches!(
        cfg.get("z"),
        Err(ConfigError::KeyNotFound { .. })
    ));

    // Dotted misses carry the full requested key.
    match cfg.get("d.f.zzz") {
        Err(ConfigError::KeyNotFound { key }) => assert_eq!(key, "d.f.zzz"),
        other => panic!("unexpected result: {other:?}"),
    }

    // Traversing through a scalar is a miss, not a panic.
    assert!(cfg.get("a.b").is_err());

    // A sequence segment past the end reports the position.
    assert!(matches!(
        cfg.get("d.h.9"),
        Err(ConfigError::IndexOutOfRange { index: 9, .. })
    ));
}

#[test]
fn test_get_as_typed_access() {
    let cfg = Config::convert(nested_data()).unwrap();

    assert_eq!(cfg.get_as::<i64>("a"), Some(1));
    assert_eq!(cfg.get_as::<i64>("d.f.g"), Some(6));
    assert_eq!(cfg.get_as::<i64>("missing"), None);
    assert_eq!(cfg.get_as::<bool>("a"), None);
}

#[test]
fn test_index_sugar() {
    let cfg = Config::convert(nested_data()).unwrap();
    assert_eq!(cfg["a"], Value::Int(1));
    assert_eq!(cfg["d.e"], Value::Int(3));
}

#[test]
#[should_panic]
fn test_index_sugar_panics_on_missing_key() {
    let cfg = Config::convert(json!({"a": 1})).unwrap();
    let _ = &cfg["z"];
}

#[test]
fn test_set_and_displaced_value() {
    let mut cfg = Config::convert(json!({"a": 1})).unwrap();

    let old = cfg.set("a", 10).unwrap();
    assert_eq!(old, Some(Value::Int(1)));
    assert_eq!(cfg.get_as::<i64>("a"), Some(10));

    let old = cfg.set("fresh", "x").unwrap();
    assert!(old.is_none());
    assert_eq!(cfg.len(), 2);
}

#[test]
fn test_set_rewraps_nested_data() {
    let mut cfg = Config::new();
    cfg.set("sub", json!({"x": [1, {"y": 2}]})).unwrap();

    assert!(matches!(cfg.get("sub").unwrap(), Value::Map(_)));
    assert_eq!(cfg.get_as::<i64>("sub.x._1.y"), Some(2));
}

#[test]
fn test_construction_rejects_bad_keys() {
    for bad in ["c.d.e", "8a", "deep_keys", "convert", "deconvert", "__dict__"] {
        let err = Config::convert(json!({ bad: 0 })).unwrap_err();
        assert!(err.is_invalid_key(), "'{bad}' should be rejected");
    }

    assert!(Config::convert(json!({"level_1": 0})).is_ok());
}

#[test]
fn test_set_rejects_bad_keys() {
    let mut cfg = Config::new();
    assert!(cfg.set("8a", 0).is_err());
    assert!(cfg.set("convert", 0).is_err());
    assert!(cfg.set("__dunder__", 0).is_err());

    // A bad key nested inside the assigned value also fails.
    assert!(cfg.set("ok", json!({"to_yaml": 1})).is_err());
    assert!(cfg.is_empty());
}

#[test]
fn test_set_deep_is_unsupported() {
    let mut cfg = Config::convert(json!({"d": {"e": 3}})).unwrap();
    let err = cfg.set_deep("d.e", 4).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedOperation { .. }));
    assert_eq!(cfg.get_as::<i64>("d.e"), Some(3));
}

#[test]
fn test_remove() {
    let mut cfg = Config::convert(json!({"a": 1, "b": 2})).unwrap();
    assert_eq!(cfg.remove("a"), Some(Value::Int(1)));
    assert_eq!(cfg.remove("a"), None);
    assert_eq!(cfg.len(), 1);
}

#[test]
fn test_contains_key() {
    let cfg = Config::convert(nested_data()).unwrap();
    assert!(cfg.contains_key("a"));
    assert!(cfg.contains_key("d.f.g"));
    assert!(cfg.contains_key("d.h._2.i"));
    assert!(!cfg.contains_key("z"));
    assert!(!cfg.contains_key("d.zzz"));
}

#[test]
fn test_shallow_update_replaces_wholesale() {
    let mut cfg = Config::convert(json!({"a": 1, "d": {"e": 3}})).unwrap();
    let other = Config::convert(json!({"d": {"f": 9}, "c": 4})).unwrap();

    cfg.update(&other);

    assert_eq!(cfg.get_as::<i64>("a"), Some(1));
    assert_eq!(cfg.get_as::<i64>("c"), Some(4));
    // The nested mapping was overwritten, not merged.
    assert!(cfg.get("d.e").is_err());
    assert_eq!(cfg.get_as::<i64>("d.f"), Some(9));
}

#[test]
fn test_deep_update_merges_nested_mappings() {
    let mut cfg = Config::convert(json!({"a": 1, "d": {"e": 3, "f": {"g": 6}}})).unwrap();
    let other = Config::convert(json!({"d": {"f": {"w": 4}}, "c": 4})).unwrap();

    cfg.deep_update(&other).unwrap();

    assert_eq!(cfg.get_as::<i64>("a"), Some(1));
    assert_eq!(cfg.get_as::<i64>("c"), Some(4));
    assert_eq!(cfg.get_as::<i64>("d.e"), Some(3));
    assert_eq!(cfg.get_as::<i64>("d.f.g"), Some(6));
    assert_eq!(cfg.get_as::<i64>("d.f.w"), Some(4));
}

#[test]
fn test_display_renders_deconverted_tree() {
    let cfg = Config::convert(json!({"a": 1, "d": {"e": 3}})).unwrap();
    let text = cfg.to_string();
    assert!(text.contains("\"a\": 1"));
    assert!(text.contains("\"e\": 3"));
}

#[test]
fn test_iteration_order() {
    let cfg = Config::convert(json!({"z": 1, "a": 2, "m": 3})).unwrap();
    let keys: Vec<&String> = cfg.keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
    let values: Vec<&Value> = cfg.values().collect();
    assert_eq!(values, [&Value::Int(1), &Value::Int(2), &Value::Int(3)]);
}
