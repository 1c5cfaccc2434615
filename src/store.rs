//! # Preset Store
//!
//! The preset store is a directory holding one sub-directory per preset,
//! named after the preset's slug.
//!
//! ## Layout
//!
//! ```text
//! <root>/
//!   <slug>/
//!     preset.json      {"name": ..., "description": ..., "tags": [...]}
//!     claude.md        instruction document (may be empty)
//!     settings.json    optional settings object
//!     commands/        optional
//!     skills/<name>/   optional, one folder per skill
//!     rules/           optional
//! ```
//!
//! Every method accepts either a slug or a display name; names are slugified
//! before touching the disk.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::archive::Archiver;
use crate::defaults::{
    BACKUP_SUFFIX, BUNDLE_EXTENSION, DOCUMENT_FILENAME, MANAGED_DIR, METADATA_FILENAME,
    ROOT_DOCUMENT_FILENAME, SETTINGS_FILENAME,
};
use crate::error::{Error, Result};
use crate::path::{is_hidden, slugify};
use crate::source::{collect_files, AuxiliaryFile, Category, PresetSource};

pub use crate::source::MemorySource;

/// Metadata stored in each preset's `preset.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetInfo {
    /// Display name as the user typed it
    pub name: String,
    /// Short free-text description
    #[serde(default)]
    pub description: String,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PresetInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tags: Vec::new(),
        }
    }
}

/// Preset store rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct PresetStore {
    root: PathBuf,
}

impl PresetStore {
    /// Open a store rooted at `root`; nothing is created until needed
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of the preset called `name`
    pub fn preset_dir(&self, name: &str) -> PathBuf {
        self.root.join(slugify(name))
    }

    /// Create the root directory if it does not exist yet
    pub fn ensure_setup(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Create an empty preset and return its slug
    pub fn create(&self, name: &str, description: &str, tags: &[String]) -> Result<String> {
        let (slug, dir) = self.reserve(name)?;

        let info = PresetInfo {
            name: name.to_string(),
            description: description.to_string(),
            tags: tags.to_vec(),
        };
        write_info(&dir, &info)?;
        fs::write(dir.join(DOCUMENT_FILENAME), "")?;

        debug!("Created preset '{}' at {}", slug, dir.display());
        Ok(slug)
    }

    /// Create a preset from an existing project's managed directory
    ///
    /// The document comes from `<project>/.claude/claude.md`, falling back to
    /// `<project>/CLAUDE.md`. Settings and the category trees are copied when
    /// present. Backups left by earlier applies (`*.bak`) are not copied.
    pub fn create_from_project(&self, name: &str, project: &Path) -> Result<String> {
        if !project.is_dir() {
            return Err(Error::TargetPathInvalid {
                path: project.to_path_buf(),
                message: "project directory not found".to_string(),
            });
        }

        let (slug, dir) = self.reserve(name)?;
        let managed = project.join(MANAGED_DIR);

        let document = fs::read_to_string(managed.join(DOCUMENT_FILENAME))
            .or_else(|_| fs::read_to_string(project.join(ROOT_DOCUMENT_FILENAME)))
            .unwrap_or_default();
        fs::write(dir.join(DOCUMENT_FILENAME), document)?;

        let settings = managed.join(SETTINGS_FILENAME);
        if settings.is_file() {
            fs::copy(&settings, dir.join(SETTINGS_FILENAME))?;
        }

        for category in Category::ALL {
            let from = managed.join(category.dir_name());
            for file in collect_files(&from)? {
                if is_backup(&file.relative_path) {
                    debug!("Skipping backup {}", file.relative_path.display());
                    continue;
                }
                let to = dir.join(category.dir_name()).join(&file.relative_path);
                if let Some(parent) = to.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(&file.source_path, &to)?;
            }
        }

        write_info(&dir, &PresetInfo::new(name))?;

        debug!("Imported preset '{}' from {}", slug, project.display());
        Ok(slug)
    }

    /// All presets with readable metadata, sorted by display name (case-insensitive)
    pub fn list_all(&self) -> Result<Vec<(String, PresetInfo)>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut presets = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let dir_name = entry.file_name().to_string_lossy().into_owned();
            if is_hidden(&dir_name) || !entry.file_type()?.is_dir() {
                continue;
            }
            match read_info_at(&entry.path()) {
                Ok(info) => presets.push((dir_name, info)),
                Err(err) => debug!("Skipping '{}': {}", dir_name, err),
            }
        }

        presets.sort_by_key(|(_, info)| info.name.to_lowercase());
        Ok(presets)
    }

    /// Whether a preset called `name` exists
    pub fn exists(&self, name: &str) -> bool {
        let slug = slugify(name);
        !slug.is_empty() && self.root.join(slug).is_dir()
    }

    /// Read a preset's metadata
    pub fn read_info(&self, name: &str) -> Result<PresetInfo> {
        self.require(name)?;
        read_info_at(&self.preset_dir(name))
    }

    /// Read a preset's document, `None` when it has none
    pub fn read_document(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.preset_dir(name).join(DOCUMENT_FILENAME)).ok()
    }

    /// Read a preset's raw settings text, `None` when it has none
    pub fn read_settings(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.preset_dir(name).join(SETTINGS_FILENAME)).ok()
    }

    /// Top-level entries of a category directory, sorted
    ///
    /// Skills are listed as folder names, commands and rules as file names.
    pub fn list_category(&self, name: &str, category: Category) -> Vec<String> {
        let dir = self.preset_dir(name).join(category.dir_name());
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                match category {
                    Category::Skills => is_dir,
                    Category::Commands | Category::Rules => !is_dir,
                }
            })
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|entry_name| !is_hidden(entry_name))
            .collect();
        names.sort();
        names
    }

    /// Delete a preset and everything in it
    pub fn delete(&self, name: &str) -> Result<()> {
        self.require(name)?;
        fs::remove_dir_all(self.preset_dir(name))?;
        debug!("Deleted preset '{}'", slugify(name));
        Ok(())
    }

    /// Export a preset as `<slug>.modopreset` inside `dest_dir`
    ///
    /// An existing bundle with the same name is replaced.
    pub fn export(&self, name: &str, dest_dir: &Path, archiver: &dyn Archiver) -> Result<PathBuf> {
        self.require(name)?;
        let slug = slugify(name);

        let bytes = archiver.pack(&self.preset_dir(name))?;
        fs::create_dir_all(dest_dir)?;
        let bundle_path = dest_dir.join(format!("{}.{}", slug, BUNDLE_EXTENSION));
        if bundle_path.exists() {
            fs::remove_file(&bundle_path)?;
        }
        fs::write(&bundle_path, bytes)?;

        debug!("Exported preset '{}' to {}", slug, bundle_path.display());
        Ok(bundle_path)
    }

    /// Import a bundle produced by [`PresetStore::export`] and return its slug
    pub fn import(&self, bundle_path: &Path, archiver: &dyn Archiver) -> Result<String> {
        let bytes = fs::read(bundle_path)?;
        let staging = tempfile::tempdir()?;
        archiver.unpack(&bytes, staging.path())?;

        let extracted = find_single_preset_dir(staging.path())?;
        let info = read_info_at(&extracted).map_err(|_| Error::Archive {
            message: format!("Invalid preset: missing or corrupt {}", METADATA_FILENAME),
        })?;

        let (slug, target) = self.reserve_path(&info.name)?;
        for file in collect_files(&extracted)? {
            let to = target.join(&file.relative_path);
            if let Some(parent) = to.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&file.source_path, &to)?;
        }

        debug!("Imported preset '{}' from {}", slug, bundle_path.display());
        Ok(slug)
    }

    fn require(&self, name: &str) -> Result<()> {
        if self.exists(name) {
            Ok(())
        } else {
            Err(Error::PresetNotFound {
                name: name.to_string(),
            })
        }
    }

    /// Check that `name` is free, then create its directory
    fn reserve(&self, name: &str) -> Result<(String, PathBuf)> {
        let (slug, dir) = self.reserve_path(name)?;
        fs::create_dir_all(&dir)?;
        Ok((slug, dir))
    }

    /// Check that `name` is free without creating anything
    fn reserve_path(&self, name: &str) -> Result<(String, PathBuf)> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(Error::InvalidPresetName {
                name: name.to_string(),
            });
        }

        self.ensure_setup()?;
        let dir = self.root.join(&slug);
        if dir.exists() {
            return Err(Error::PresetAlreadyExists { name: slug });
        }
        Ok((slug, dir))
    }
}

impl PresetSource for PresetStore {
    fn exists(&self, slug: &str) -> bool {
        PresetStore::exists(self, slug)
    }

    fn document(&self, slug: &str) -> Option<String> {
        self.read_document(slug)
    }

    fn settings(&self, slug: &str) -> Option<String> {
        self.read_settings(slug)
    }

    fn display_name(&self, slug: &str) -> Option<String> {
        self.read_info(slug).ok().map(|info| info.name)
    }

    fn auxiliary_files(&self, slug: &str, category: Category) -> Result<Vec<AuxiliaryFile>> {
        collect_files(&self.preset_dir(slug).join(category.dir_name()))
    }
}

fn is_backup(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(BACKUP_SUFFIX))
}

fn read_info_at(dir: &Path) -> Result<PresetInfo> {
    let data = fs::read_to_string(dir.join(METADATA_FILENAME))?;
    Ok(serde_json::from_str(&data)?)
}

fn write_info(dir: &Path, info: &PresetInfo) -> Result<()> {
    let mut data = serde_json::to_string_pretty(info)?;
    data.push('\n');
    fs::write(dir.join(METADATA_FILENAME), data)?;
    Ok(())
}

/// Locate the one preset directory an unpacked bundle contains
fn find_single_preset_dir(staging: &Path) -> Result<PathBuf> {
    for entry in fs::read_dir(staging)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_hidden(&name) && entry.file_type()?.is_dir() {
            return Ok(entry.path());
        }
    }
    Err(Error::Archive {
        message: "No preset found in bundle".to_string(),
    })
}
