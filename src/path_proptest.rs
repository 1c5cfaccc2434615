//! Property-based tests for slug normalization.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::slugify;
    use proptest::prelude::*;

    proptest! {
        /// Property: slugify only ever emits letters, digits and hyphens
        #[test]
        fn slugify_output_is_filesystem_safe(input in ".*") {
            let result = slugify(&input);
            for ch in result.chars() {
                prop_assert!(
                    ch.is_alphabetic() || ch.is_numeric() || ch == '-',
                    "slugify produced '{}' from input '{}'",
                    ch,
                    input
                );
            }
        }

        /// Property: slugify is idempotent
        #[test]
        fn slugify_is_idempotent(input in ".*") {
            let once = slugify(&input);
            let twice = slugify(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: each space becomes exactly one hyphen
        #[test]
        fn slugify_maps_spaces_one_to_one(words in prop::collection::vec("[a-z0-9]{1,8}", 1..5), gap in 1usize..4) {
            let input = words.join(&" ".repeat(gap));
            let expected = words.join(&"-".repeat(gap));
            prop_assert_eq!(slugify(&input), expected);
        }

        /// Property: lowercase ASCII alphanumerics pass through untouched
        #[test]
        fn slugify_preserves_clean_ascii(input in "[a-z0-9-]+") {
            prop_assert_eq!(slugify(&input), input);
        }

        /// Property: output is never longer (in chars) than the input
        #[test]
        fn slugify_never_grows_ascii(input in "[ -~]*") {
            prop_assert!(slugify(&input).chars().count() <= input.chars().count());
        }
    }
}
