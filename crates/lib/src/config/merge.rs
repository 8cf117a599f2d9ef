//! Recursive merge for plain mapping data.

use serde_json::{Map, Value as RawValue};

/// Merges `overlay` into `base`. Values from `overlay` take priority.
///
/// Mapping values merge key-wise, recursively. Everything else, including
/// sequences, is overwritten wholesale. Keys present only in `base` survive
/// untouched. An existing non-mapping value under a key that `overlay` maps
/// to a mapping is discarded before the recursive merge.
///
/// ```
/// # use deepconf::config::merge::deep_merge;
/// # use serde_json::json;
/// let mut base = json!({"a": 1, "d": {"e": 3}});
/// let overlay = json!({"a": 5, "d": {"f": 9}});
/// deep_merge(
///     base.as_object_mut().unwrap(),
///     overlay.as_object().unwrap().clone(),
/// );
/// assert_eq!(base, json!({"a": 5, "d": {"e": 3, "f": 9}}));
/// ```
pub fn deep_merge(base: &mut Map<String, RawValue>, overlay: Map<String, RawValue>) {
    for (key, value) in overlay {
        match value {
            RawValue::Object(incoming) => {
                let slot = base
                    .entry(key)
                    .or_insert_with(|| RawValue::Object(Map::new()));
                if !slot.is_object() {
                    *slot = RawValue::Object(Map::new());
                }
                if let RawValue::Object(existing) = slot {
                    deep_merge(existing, incoming);
                }
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}
