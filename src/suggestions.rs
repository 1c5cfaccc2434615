//! # Error Suggestions
//!
//! Helpers that build user-facing errors with `hint:` lines, so a failing
//! command says both what went wrong and what to try next.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modo::suggestions;
//!
//! if !store.exists(&name) {
//!     return Err(suggestions::preset_not_found(&name, &known_slugs));
//! }
//! ```

use std::path::Path;

use crate::error::Error;

/// Error for a preset name that does not resolve to a stored preset.
///
/// Suggests the closest known slug when one is near enough.
pub fn preset_not_found(name: &str, known: &[String]) -> anyhow::Error {
    let candidates: Vec<&str> = known.iter().map(String::as_str).collect();
    let did_you_mean = find_similar(name, &candidates)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Preset '{name}' not found{did_you_mean}\n\n\
         hint: Run 'modo list' to see available presets\n\
         hint: Run 'modo new {name}' to create it"
    )
}

/// Error for a create or import that collides with an existing preset.
pub fn preset_already_exists(name: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Preset '{name}' already exists\n\n\
         hint: Choose a different name\n\
         hint: Run 'modo remove {name}' first to replace it"
    )
}

/// Error for `apply` called without any preset names.
pub fn no_presets_specified() -> anyhow::Error {
    anyhow::anyhow!(
        "No presets specified\n\n\
         hint: Pass one or more preset names, e.g. 'modo apply base swift-app'\n\
         hint: Run 'modo list' to see available presets"
    )
}

/// Error for a `--from` or `--to` directory that does not exist.
pub fn project_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Project directory not found: {path}\n\n\
         hint: Check the path for typos\n\
         hint: Omit the flag to use the current directory",
        path = path.display()
    )
}

/// Error for a preset name that slugifies to nothing.
pub fn invalid_preset_name(name: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid preset name '{name}'\n\n\
         hint: Names must contain at least one letter, digit, space or hyphen"
    )
}

/// Translate a library error into one carrying hints where a hint helps.
pub fn explain(error: Error, known: &[String]) -> anyhow::Error {
    match error {
        Error::PresetNotFound { name } => preset_not_found(&name, known),
        Error::PresetAlreadyExists { name } => preset_already_exists(&name),
        Error::NoPresetsSpecified => no_presets_specified(),
        Error::InvalidPresetName { name } => invalid_preset_name(&name),
        other => other.into(),
    }
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // Single rolling row instead of the full matrix
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, a_char) in a_chars.iter().enumerate() {
        let mut current = vec![i + 1; b_chars.len() + 1];
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        previous = current;
    }

    previous[b_chars.len()]
}
