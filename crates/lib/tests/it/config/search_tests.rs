//! Final-segment search tests.

use deepconf::{Config, ConfigNode, Value};
use serde_json::json;

use super::helpers::nested_data;

#[test]
fn test_search_matches_every_final_segment() {
    // Every dotted key ending in "a" matches, including the root key.
    let cfg = Config::convert(json!({"a": {"a": {"a": 1}}})).unwrap();
    let results = cfg.search("a");

    let keys: Vec<&str> = results.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "a.a", "a.a.a"]);
    assert_eq!(results["a.a.a"], &Value::Int(1));
    assert_eq!(results["a.a"], cfg.get("a.a").unwrap());
    assert_eq!(results["a"], cfg.get("a").unwrap());
}

#[test]
fn test_search_exact_match_only() {
    let cfg = Config::convert(nested_data()).unwrap();

    let results = cfg.search("g");
    let keys: Vec<&str> = results.keys().map(String::as_str).collect();
    assert_eq!(keys, ["d.f.g"]);
    assert_eq!(results["d.f.g"], &Value::Int(6));

    assert!(cfg.search("nope").is_empty());

    // "e" is a substring of nothing else here; exact search finds only d.e.
    let results = cfg.search("e");
    let keys: Vec<&str> = results.keys().map(String::as_str).collect();
    assert_eq!(keys, ["d.e"]);
}

#[test]
fn test_search_matches_index_segments() {
    let cfg = Config::convert(nested_data()).unwrap();
    let results = cfg.search("_0");
    let keys: Vec<&str> = results.keys().map(String::as_str).collect();
    assert_eq!(keys, ["d.h._0"]);
    assert_eq!(results["d.h._0"], &Value::Int(8));
}

#[test]
fn test_search_substring() {
    let cfg = Config::convert(
        json!({"model": 1, "models": {"decoder": 2}, "mode": 3, "other": 4}),
    )
    .unwrap();

    let results = cfg.search_substring("mode");
    let keys: Vec<&str> = results.keys().map(String::as_str).collect();
    assert_eq!(keys, ["model", "models", "mode"]);

    let results = cfg.search_substring("de");
    let keys: Vec<&str> = results.keys().map(String::as_str).collect();
    assert_eq!(keys, ["model", "models", "models.decoder", "mode"]);
}

#[test]
fn test_search_values_keeps_traversal_order() {
    let cfg = Config::convert(json!({"a": {"a": {"a": 1}}})).unwrap();
    let values = cfg.search_values("a");
    assert_eq!(values.len(), 3);
    // Last match is the innermost scalar.
    assert_eq!(values[2], &Value::Int(1));
    assert!(matches!(values[0], Value::Map(_)));
}
