//! Path and name utilities for modo

use std::path::{Component, Path};

/// Convert a human preset name into its filesystem-safe slug
///
/// The name is lowercased, every space becomes one hyphen, and every
/// character that is not a letter, a digit or a hyphen is dropped. Runs of
/// spaces are not collapsed and punctuation is removed rather than replaced.
///
/// ```
/// use modo::path::slugify;
///
/// assert_eq!(slugify("Swift App"), "swift-app");
/// assert_eq!(slugify("My Config!"), "my-config");
/// assert_eq!(slugify("a   b"), "a---b");
/// ```
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_alphabetic() || c.is_numeric() || *c == '-')
        .collect()
}

/// Render a relative path with forward slashes, as used in apply reports
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a file or directory name is hidden (dot-prefixed)
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Whether a relative path stays inside its root
///
/// Rejects absolute paths, prefixes and any `..` component.
pub fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}
