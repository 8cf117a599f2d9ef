use serde_json::{json, Value as RawValue};

/// A nested mapping exercising every container shape: scalars, nested
/// mappings, and a sequence holding both scalars and a mapping.
pub fn nested_data() -> RawValue {
    json!({
        "a": 1,
        "b": 2,
        "d": {"e": 3, "f": {"g": 6}, "h": [8, 2, {"i": 5, "j": 9}]},
    })
}

/// A nested sequence with scalar, mapping, and sequence elements.
pub fn nested_list() -> RawValue {
    json!([1, 2, {"a": 3}, [4, {"b": 5}]])
}
