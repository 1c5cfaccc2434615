//! JSON settings merge
//!
//! This module provides the structural deep merge used for `settings.json`.
//! Settings are loosely typed, so they are first classified into a
//! [`SettingsValue`], a tagged variant that separates the array shapes which
//! merge differently, and the merge then dispatches on the pair of variants.
//!
//! ## Merge rules
//!
//! Applied key by key over the overlay's keys:
//!
//! - Object + object: merged recursively
//! - String array + string array: union, base order first, no duplicates
//! - Object array + object array: concatenated, base first
//! - Anything else: the overlay value replaces the base value
//!
//! Keys only present in the base are left untouched, keys only present in the
//! overlay are added. An empty array counts as both a string array and an
//! object array.
//!
//! ## Example
//!
//! ```
//! use modo::merge::json::{deep_merge, SettingsMap, SettingsValue};
//! use serde_json::json;
//!
//! let base = SettingsValue::from_json(json!({"allow": ["a", "b"]}));
//! let overlay = SettingsValue::from_json(json!({"allow": ["b", "c"]}));
//! let (SettingsValue::Object(base), SettingsValue::Object(overlay)) = (base, overlay) else {
//!     unreachable!()
//! };
//!
//! let merged: SettingsMap = deep_merge(base, overlay);
//! assert_eq!(
//!     SettingsValue::Object(merged).to_json(),
//!     json!({"allow": ["a", "b", "c"]})
//! );
//! ```

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

/// An object of settings, ordered by key so serialization is canonical
pub type SettingsMap = BTreeMap<String, SettingsValue>;

/// A settings value classified by how it merges
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsValue {
    /// A nested object
    Object(SettingsMap),
    /// An array whose elements are all strings (or an empty array)
    StringArray(Vec<String>),
    /// A non-empty array whose elements are all objects
    ObjectArray(Vec<SettingsMap>),
    /// Any other value: numbers, booleans, null, strings, mixed arrays
    Scalar(JsonValue),
}

impl SettingsValue {
    /// Classify a raw JSON value
    pub fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => SettingsValue::Object(map_from_json(map)),
            JsonValue::Array(items) => classify_array(items),
            other => SettingsValue::Scalar(other),
        }
    }

    /// Convert back into a raw JSON value
    ///
    /// `serde_json` maps are key-sorted, so the result serializes canonically.
    pub fn to_json(&self) -> JsonValue {
        match self {
            SettingsValue::Object(map) => map_to_json(map),
            SettingsValue::StringArray(items) => {
                JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
            }
            SettingsValue::ObjectArray(items) => {
                JsonValue::Array(items.iter().map(map_to_json).collect())
            }
            SettingsValue::Scalar(value) => value.clone(),
        }
    }

    /// Parse settings text into a top-level object
    ///
    /// Returns `Ok(None)` for blank text. Invalid JSON, or JSON whose top level
    /// is not an object, is an [`Error::StructuralParse`] naming `source_name`.
    pub fn parse(text: &str, source_name: &str) -> Result<Option<SettingsMap>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let value: JsonValue =
            serde_json::from_str(text).map_err(|err| Error::StructuralParse {
                source_name: source_name.to_string(),
                message: err.to_string(),
            })?;

        match value {
            JsonValue::Object(map) => Ok(Some(map_from_json(map))),
            other => Err(Error::StructuralParse {
                source_name: source_name.to_string(),
                message: format!("expected a JSON object, found {}", kind_name(&other)),
            }),
        }
    }
}

/// Deep merge `overlay` onto `base`, returning the merged object
pub fn deep_merge(mut base: SettingsMap, overlay: SettingsMap) -> SettingsMap {
    for (key, overlay_value) in overlay {
        let merged = match base.remove(&key) {
            Some(base_value) => merge_values(base_value, overlay_value),
            None => overlay_value,
        };
        base.insert(key, merged);
    }
    base
}

fn merge_values(base: SettingsValue, overlay: SettingsValue) -> SettingsValue {
    match (base, overlay) {
        (SettingsValue::Object(base), SettingsValue::Object(overlay)) => {
            SettingsValue::Object(deep_merge(base, overlay))
        }
        (SettingsValue::StringArray(mut base), SettingsValue::StringArray(overlay)) => {
            for item in overlay {
                if !base.contains(&item) {
                    base.push(item);
                }
            }
            SettingsValue::StringArray(base)
        }
        (SettingsValue::ObjectArray(mut base), SettingsValue::ObjectArray(overlay)) => {
            base.extend(overlay);
            SettingsValue::ObjectArray(base)
        }
        // An empty array is also an empty object array
        (SettingsValue::StringArray(base), SettingsValue::ObjectArray(overlay)) if base.is_empty() => {
            SettingsValue::ObjectArray(overlay)
        }
        (SettingsValue::ObjectArray(base), SettingsValue::StringArray(overlay))
            if overlay.is_empty() =>
        {
            SettingsValue::ObjectArray(base)
        }
        (_, overlay) => overlay,
    }
}

fn classify_array(items: Vec<JsonValue>) -> SettingsValue {
    if items.iter().all(JsonValue::is_string) {
        let strings = items
            .into_iter()
            .filter_map(|item| match item {
                JsonValue::String(s) => Some(s),
                _ => None,
            })
            .collect();
        return SettingsValue::StringArray(strings);
    }

    if items.iter().all(JsonValue::is_object) {
        let objects = items
            .into_iter()
            .filter_map(|item| match item {
                JsonValue::Object(map) => Some(map_from_json(map)),
                _ => None,
            })
            .collect();
        return SettingsValue::ObjectArray(objects);
    }

    SettingsValue::Scalar(JsonValue::Array(items))
}

fn map_from_json(map: serde_json::Map<String, JsonValue>) -> SettingsMap {
    map.into_iter()
        .map(|(key, value)| (key, SettingsValue::from_json(value)))
        .collect()
}

fn map_to_json(map: &SettingsMap) -> JsonValue {
    JsonValue::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect(),
    )
}

fn kind_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Render merged settings in their canonical on-disk form
///
/// Pretty-printed with sorted keys and a trailing newline.
pub fn to_canonical_string(map: &SettingsMap) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(&map_to_json(map))?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: JsonValue) -> SettingsMap {
        match SettingsValue::from_json(value) {
            SettingsValue::Object(map) => map,
            other => panic!("expected object, got {:?}", other),
        }
    }

    fn merged(base: JsonValue, overlay: JsonValue) -> JsonValue {
        SettingsValue::Object(deep_merge(object(base), object(overlay))).to_json()
    }

    mod classification_tests {
        use super::*;

        #[test]
        fn test_string_array() {
            assert_eq!(
                SettingsValue::from_json(json!(["a", "b"])),
                SettingsValue::StringArray(vec!["a".to_string(), "b".to_string()])
            );
        }

        #[test]
        fn test_empty_array_is_string_array() {
            assert_eq!(
                SettingsValue::from_json(json!([])),
                SettingsValue::StringArray(Vec::new())
            );
        }

        #[test]
        fn test_object_array() {
            let value = SettingsValue::from_json(json!([{"event": "pre"}]));
            assert!(matches!(value, SettingsValue::ObjectArray(ref items) if items.len() == 1));
        }

        #[test]
        fn test_mixed_array_is_scalar() {
            let value = SettingsValue::from_json(json!(["a", 1]));
            assert_eq!(value, SettingsValue::Scalar(json!(["a", 1])));
        }

        #[test]
        fn test_round_trip_preserves_value() {
            let raw = json!({"b": [1, 2], "a": {"x": null, "y": [{"k": true}]}});
            assert_eq!(SettingsValue::from_json(raw.clone()).to_json(), raw);
        }
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_blank_is_none() {
            assert!(SettingsValue::parse("  \n", "test").unwrap().is_none());
        }

        #[test]
        fn test_parse_object() {
            let map = SettingsValue::parse(r#"{"a": 1}"#, "test").unwrap().unwrap();
            assert_eq!(map.len(), 1);
        }

        #[test]
        fn test_parse_invalid_json() {
            let err = SettingsValue::parse("{not json", "preset 'x'").unwrap_err();
            assert!(matches!(err, Error::StructuralParse { .. }));
            assert!(err.to_string().contains("preset 'x'"));
        }

        #[test]
        fn test_parse_non_object_top_level() {
            let err = SettingsValue::parse("[1, 2]", "test").unwrap_err();
            assert!(err.to_string().contains("expected a JSON object, found an array"));
        }
    }

    mod deep_merging_tests {
        use super::*;

        #[test]
        fn test_string_arrays_union() {
            let result = merged(
                json!({"permissions": {"allow": ["swift build", "swift test"]}}),
                json!({"permissions": {"allow": ["git push", "swift build"]}}),
            );
            assert_eq!(
                result["permissions"]["allow"],
                json!(["swift build", "swift test", "git push"])
            );
        }

        #[test]
        fn test_string_array_union_keeps_base_order() {
            let result = merged(json!({"allow": ["a", "b"]}), json!({"allow": ["b", "c"]}));
            assert_eq!(result, json!({"allow": ["a", "b", "c"]}));
        }

        #[test]
        fn test_string_array_suppresses_overlay_duplicates() {
            let result = merged(json!({"tags": ["x"]}), json!({"tags": ["y", "y", "x"]}));
            assert_eq!(result["tags"], json!(["x", "y"]));
        }

        #[test]
        fn test_nested_objects_keep_siblings() {
            let result = merged(
                json!({"permissions": {"allow": ["swift build"]}}),
                json!({"permissions": {"deny": ["rm -rf"]}}),
            );
            assert_eq!(result["permissions"]["allow"], json!(["swift build"]));
            assert_eq!(result["permissions"]["deny"], json!(["rm -rf"]));
        }

        #[test]
        fn test_overlay_wins_for_scalars() {
            let result = merged(json!({"version": 1, "name": "old"}), json!({"version": 2}));
            assert_eq!(result, json!({"version": 2, "name": "old"}));
        }

        #[test]
        fn test_adds_new_keys() {
            let result = merged(json!({"a": 1}), json!({"b": 2}));
            assert_eq!(result, json!({"a": 1, "b": 2}));
        }

        #[test]
        fn test_object_arrays_concatenate() {
            let result = merged(
                json!({"hooks": [{"event": "pre-commit", "cmd": "lint"}]}),
                json!({"hooks": [{"event": "post-commit", "cmd": "notify"}]}),
            );
            let hooks = result["hooks"].as_array().unwrap();
            assert_eq!(hooks.len(), 2);
            assert_eq!(hooks[0]["event"], "pre-commit");
            assert_eq!(hooks[1]["event"], "post-commit");
        }

        #[test]
        fn test_object_arrays_keep_duplicates() {
            let hook = json!({"event": "pre"});
            let result = merged(json!({"hooks": [hook.clone()]}), json!({"hooks": [hook]}));
            assert_eq!(result["hooks"].as_array().unwrap().len(), 2);
        }

        #[test]
        fn test_empty_base_array_accepts_objects() {
            let result = merged(json!({"hooks": []}), json!({"hooks": [{"event": "pre"}]}));
            assert_eq!(result["hooks"], json!([{"event": "pre"}]));
        }

        #[test]
        fn test_empty_overlay_array_keeps_objects() {
            let result = merged(json!({"hooks": [{"event": "pre"}]}), json!({"hooks": []}));
            assert_eq!(result["hooks"], json!([{"event": "pre"}]));
        }

        #[test]
        fn test_empty_base() {
            let result = merged(json!({}), json!({"key": "value"}));
            assert_eq!(result, json!({"key": "value"}));
        }

        #[test]
        fn test_empty_overlay() {
            let result = merged(json!({"key": "value"}), json!({}));
            assert_eq!(result, json!({"key": "value"}));
        }
    }

    mod type_conflict_tests {
        use super::*;

        #[test]
        fn test_object_replaces_scalar() {
            let result = merged(json!({"key": "string"}), json!({"key": {"nested": 1}}));
            assert_eq!(result["key"], json!({"nested": 1}));
        }

        #[test]
        fn test_scalar_replaces_object() {
            let result = merged(json!({"key": {"nested": 1}}), json!({"key": "string"}));
            assert_eq!(result["key"], json!("string"));
        }

        #[test]
        fn test_object_array_replaces_string_array() {
            let result = merged(json!({"items": ["a"]}), json!({"items": [{"b": 1}]}));
            assert_eq!(result["items"], json!([{"b": 1}]));
        }

        #[test]
        fn test_number_arrays_are_replaced() {
            let result = merged(json!({"ports": [1, 2]}), json!({"ports": [3]}));
            assert_eq!(result["ports"], json!([3]));
        }

        #[test]
        fn test_null_overlay_replaces() {
            let result = merged(json!({"key": {"a": 1}}), json!({"key": null}));
            assert!(result["key"].is_null());
        }
    }

    #[test]
    fn test_canonical_string_sorts_keys() {
        let map = object(json!({"b": 1, "a": {"d": true, "c": false}}));
        let rendered = to_canonical_string(&map).unwrap();
        assert!(rendered.ends_with('\n'));
        let a = rendered.find("\"a\"").unwrap();
        let b = rendered.find("\"b\"").unwrap();
        let c = rendered.find("\"c\"").unwrap();
        let d = rendered.find("\"d\"").unwrap();
        assert!(a < b);
        assert!(c < d);
    }
}
