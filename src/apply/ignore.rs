//! Ignore-file patching

use crate::defaults::{ignore_entry, IGNORE_COMMENT};

/// How the ignore file has to change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnorePatch {
    /// The entry is already listed
    Unchanged,
    /// The file exists; this is its new content
    Append(String),
    /// The file is missing; this is its content
    Create(String),
}

/// Work out the patch for an ignore file with the given current content
///
/// Only an exact line match counts as present.
pub fn plan(existing: Option<&str>) -> IgnorePatch {
    let entry = ignore_entry();
    match existing {
        Some(content) if content.lines().any(|line| line == entry) => IgnorePatch::Unchanged,
        Some(content) => {
            IgnorePatch::Append(format!("{}\n\n{}\n{}\n", content, IGNORE_COMMENT, entry))
        }
        None => IgnorePatch::Create(format!("{}\n{}\n", IGNORE_COMMENT, entry)),
    }
}
