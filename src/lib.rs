//! # modo
//!
//! Manage reusable assistant configuration presets and compose them onto
//! projects.
//!
//! A preset bundles an instruction document, a settings object and optional
//! `commands/`, `skills/` and `rules/` trees. Applying presets to a project
//! writes the union of their content into the project's `.claude/` directory.
//!
//! ## Quick Example
//!
//! ```
//! use modo::apply::Engine;
//! use modo::source::{Category, MemoryPreset, MemorySource};
//!
//! let source = MemorySource::new()
//!     .with("base", MemoryPreset::new("Base").document("Be concise."))
//!     .with(
//!         "swift",
//!         MemoryPreset::new("Swift")
//!             .settings(r#"{"permissions": {"allow": ["Bash(swift build)"]}}"#)
//!             .file(Category::Commands, "build.md", "Build the app."),
//!     );
//!
//! let project = tempfile::tempdir().unwrap();
//! let result = Engine::new(&source)
//!     .apply(&["base".to_string(), "swift".to_string()], project.path(), false)
//!     .unwrap();
//!
//! assert_eq!(result.section_count, 1);
//! assert!(project.path().join(".claude/commands/build.md").exists());
//! ```
//!
//! ## Core Concepts
//!
//! - **Presets (`store`, `source`)**: The on-disk preset store and the
//!   read-only [`source::PresetSource`] view the engine consumes.
//! - **Merging (`merge`)**: Pure algorithms for compiling documents and
//!   deep-merging settings.
//! - **Applying (`apply`)**: The staged engine that writes merged content
//!   into a project with backups, conflict tracking and dry-run support.
//! - **Bundles (`archive`)**: Single-file export and import of presets.

pub mod apply;
pub mod archive;
pub mod defaults;
pub mod error;
pub mod merge;
pub mod output;
pub mod path;
pub mod source;
pub mod store;
pub mod suggestions;

#[cfg(test)]
mod path_proptest;

pub use error::{Error, Result};
