//! # Merge & Apply Engine
//!
//! Composes an ordered list of presets onto a target project directory.
//!
//! ## Stages
//!
//! An apply runs these stages, strictly in order:
//!
//! 1. Bootstrap - Ensure the managed `.claude/` directory exists
//! 2. Document - Compile every preset's document into `.claude/claude.md`
//! 3. Settings - Deep-merge every preset's settings onto `.claude/settings.json`
//! 4. Assets - Copy the `commands`, `skills` and `rules` trees
//! 5. Ignore - Make sure `.gitignore` lists the managed directory
//! 6. Record - Write `.claude/.modo.json` (skipped in dry-run)
//!
//! Presets listed later take precedence. Every file that existed before the
//! call and is about to be replaced is first copied to a `.bak` sibling.
//!
//! In dry-run mode the same bookkeeping happens but nothing is written, so the
//! returned [`ApplyResult`] describes exactly what a real run would do.
//!
//! ## Example
//!
//! ```
//! use modo::apply::Engine;
//! use modo::source::{MemoryPreset, MemorySource};
//!
//! let source = MemorySource::new()
//!     .with("base", MemoryPreset::new("Base").document("Be concise."));
//! let project = tempfile::tempdir().unwrap();
//!
//! let result = Engine::new(&source)
//!     .apply(&["base".to_string()], project.path(), true)
//!     .unwrap();
//!
//! assert!(result.created.contains(&".claude/claude.md".to_string()));
//! assert!(!project.path().join(".claude").exists());
//! ```

pub mod ignore;
pub mod record;
mod stages;
pub mod write;

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use crate::defaults::MANAGED_DIR;
use crate::error::{Error, Result};
use crate::source::PresetSource;

pub use record::ApplyRecord;

/// A file placed by one preset and then replaced by a later one in the same apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overwrite {
    /// Path relative to the target
    pub path: String,
    /// Slug of the preset whose file was replaced
    pub displaced: String,
    /// Slug of the preset whose file won
    pub winner: String,
}

/// Every filesystem change an apply made, or would make in dry-run mode
///
/// Paths are relative to the target and use forward slashes. Directories end
/// with a slash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResult {
    pub dry_run: bool,
    pub created: Vec<String>,
    pub modified: Vec<String>,
    pub backed_up: Vec<String>,
    /// Auxiliary files, one entry per final path
    pub copied: Vec<String>,
    pub overwritten: Vec<Overwrite>,
    /// Presets that contributed a non-empty document
    pub section_count: usize,
    /// Presets that contributed settings
    pub settings_preset_count: usize,
}

impl ApplyResult {
    /// Whether the apply changed, or would change, nothing at all
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.modified.is_empty()
            && self.backed_up.is_empty()
            && self.copied.is_empty()
    }
}

/// The apply engine, reading presets from an injected [`PresetSource`]
///
/// The engine keeps no state between calls.
pub struct Engine<'a> {
    source: &'a dyn PresetSource,
}

impl<'a> Engine<'a> {
    pub fn new(source: &'a dyn PresetSource) -> Self {
        Self { source }
    }

    /// Apply `slugs`, lowest priority first, to `target`
    ///
    /// All slugs are resolved before anything is touched: a missing preset
    /// fails the call with no side effects. Later I/O failures are propagated
    /// without rolling back earlier stages.
    pub fn apply(&self, slugs: &[String], target: &Path, dry_run: bool) -> Result<ApplyResult> {
        if slugs.is_empty() {
            return Err(Error::NoPresetsSpecified);
        }
        if let Some(missing) = slugs.iter().find(|slug| !self.source.exists(slug)) {
            return Err(Error::PresetNotFound {
                name: missing.clone(),
            });
        }

        prepare_target(target, dry_run)?;
        debug!(
            "Applying {} to {}{}",
            slugs.join(", "),
            target.display(),
            if dry_run { " (dry run)" } else { "" }
        );

        let result = stages::ApplyRun::new(self.source, slugs, target, dry_run).execute()?;

        info!(
            "Applied {} preset(s) to {}: {} created, {} modified, {} copied",
            slugs.len(),
            target.display(),
            result.created.len(),
            result.modified.len(),
            result.copied.len()
        );
        Ok(result)
    }
}

/// Make sure the target is a directory, creating it unless this is a dry run
///
/// An existing managed path inside the target must be a directory too.
fn prepare_target(target: &Path, dry_run: bool) -> Result<()> {
    if target.exists() {
        if !target.is_dir() {
            return Err(Error::TargetPathInvalid {
                path: target.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }
        let managed = target.join(MANAGED_DIR);
        if managed.exists() && !managed.is_dir() {
            return Err(Error::TargetPathInvalid {
                path: managed,
                message: "managed directory is not a directory".to_string(),
            });
        }
        return Ok(());
    }

    if dry_run {
        return Ok(());
    }
    fs::create_dir_all(target).map_err(|err| Error::TargetPathInvalid {
        path: target.to_path_buf(),
        message: err.to_string(),
    })
}
