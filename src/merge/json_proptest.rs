//! Property-based tests for the settings deep merge.

#[cfg(test)]
mod proptest_tests {
    use crate::merge::json::{deep_merge, SettingsMap, SettingsValue};
    use proptest::prelude::*;
    use serde_json::{json, Value as JsonValue};

    fn leaf() -> impl Strategy<Value = JsonValue> {
        prop_oneof![
            any::<bool>().prop_map(JsonValue::from),
            any::<i64>().prop_map(JsonValue::from),
            "[a-z]{0,6}".prop_map(JsonValue::from),
            prop::collection::vec("[a-z]{1,4}", 0..4).prop_map(|items| json!(items)),
        ]
    }

    fn settings() -> impl Strategy<Value = SettingsMap> {
        let value = leaf().prop_recursive(2, 16, 4, |inner| {
            prop::collection::btree_map("[a-c]{1,2}", inner, 0..4)
                .prop_map(|map| JsonValue::Object(map.into_iter().collect()))
        });
        prop::collection::btree_map("[a-d]{1,2}", value, 0..5).prop_map(|map| {
            map.into_iter()
                .map(|(key, value)| (key, SettingsValue::from_json(value)))
                .collect()
        })
    }

    proptest! {
        /// Property: merging an empty overlay returns the base
        #[test]
        fn empty_overlay_is_identity(base in settings()) {
            prop_assert_eq!(deep_merge(base.clone(), SettingsMap::new()), base);
        }

        /// Property: merging onto an empty base returns the overlay
        #[test]
        fn empty_base_yields_overlay(overlay in settings()) {
            prop_assert_eq!(deep_merge(SettingsMap::new(), overlay.clone()), overlay);
        }

        /// Property: the merged keys are the union of both key sets
        #[test]
        fn keys_are_unioned(base in settings(), overlay in settings()) {
            let merged = deep_merge(base.clone(), overlay.clone());
            for key in base.keys().chain(overlay.keys()) {
                prop_assert!(merged.contains_key(key));
            }
            prop_assert!(merged.len() <= base.len() + overlay.len());
        }

        /// Property: string arrays keep the base order and gain no duplicates
        #[test]
        fn string_union_keeps_base_prefix(
            base in prop::collection::vec("[a-e]", 0..6),
            overlay in prop::collection::vec("[a-e]", 0..6),
        ) {
            let mut deduped_base: Vec<String> = Vec::new();
            for item in &base {
                if !deduped_base.contains(item) {
                    deduped_base.push(item.clone());
                }
            }

            let wrap = |items: Vec<String>| -> SettingsMap {
                [("allow".to_string(), SettingsValue::StringArray(items))].into_iter().collect()
            };
            let merged = deep_merge(wrap(deduped_base.clone()), wrap(overlay.clone()));

            let Some(SettingsValue::StringArray(result)) = merged.get("allow") else {
                return Err(TestCaseError::fail("allow is no longer a string array"));
            };
            prop_assert_eq!(&result[..deduped_base.len()], &deduped_base[..]);
            for item in &overlay {
                prop_assert!(result.contains(item));
            }
            for (index, item) in result.iter().enumerate() {
                prop_assert!(!result[index + 1..].contains(item));
            }
        }
    }
}
