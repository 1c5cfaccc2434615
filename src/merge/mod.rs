//! Merge operations for preset content
//!
//! This module holds the two pure merge algorithms the apply engine builds on.
//! Neither touches the filesystem.
//!
//! ## Formats
//!
//! - JSON (json.rs) - Structural deep merge of `settings.json`
//! - Markdown (markdown.rs) - Compilation of preset documents into one file

pub mod json;
pub mod markdown;

pub use json::{deep_merge, SettingsMap, SettingsValue};
pub use markdown::{compile_document, DocumentSection};

#[cfg(test)]
mod json_proptest;
