//! Read-only access to presets
//!
//! The apply engine never reads the preset store directly. It goes through
//! [`PresetSource`], which the on-disk [`crate::store::PresetStore`] implements
//! and which [`MemorySource`] implements for tests and embedding.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::path::{is_hidden, to_slash};

/// Fixed auxiliary directory categories, in apply order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Slash commands, one Markdown file each
    Commands,
    /// Skills, one folder each holding a `SKILL.md`
    Skills,
    /// Rule files
    Rules,
}

impl Category {
    /// Every category, in the order the apply engine processes them
    pub const ALL: [Category; 3] = [Category::Commands, Category::Skills, Category::Rules];

    /// Directory name of the category, both in a preset and under the managed dir
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Commands => "commands",
            Category::Skills => "skills",
            Category::Rules => "rules",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A regular file inside one of a preset's category directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxiliaryFile {
    /// Path relative to the category directory
    pub relative_path: PathBuf,
    /// Where the content comes from
    pub source_path: PathBuf,
}

/// Read-only accessor over persisted presets
pub trait PresetSource {
    /// Whether a preset with this slug exists
    fn exists(&self, slug: &str) -> bool;

    /// The preset's instruction document, if it has one
    fn document(&self, slug: &str) -> Option<String>;

    /// The preset's raw settings text, if it has any
    fn settings(&self, slug: &str) -> Option<String>;

    /// The preset's display name; callers fall back to the slug
    fn display_name(&self, slug: &str) -> Option<String>;

    /// Regular files of one category, sorted by relative path, hidden entries excluded
    fn auxiliary_files(&self, slug: &str, category: Category) -> Result<Vec<AuxiliaryFile>>;

    /// Read the content of a file returned by [`PresetSource::auxiliary_files`]
    fn read_auxiliary(&self, file: &AuxiliaryFile) -> Result<Vec<u8>> {
        Ok(fs::read(&file.source_path)?)
    }
}

/// Collect the regular files below `root`
///
/// Hidden files and directories are skipped. The result is sorted by the
/// forward-slash form of the relative path. A missing `root` yields nothing.
pub fn collect_files(root: &Path) -> Result<Vec<AuxiliaryFile>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_entry(|e| {
        // Always allow the root directory (depth 0) to be processed
        e.depth() == 0 || !is_hidden(&e.file_name().to_string_lossy())
    }) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative_path = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| Error::Io(std::io::Error::other(e)))?
            .to_path_buf();
        files.push(AuxiliaryFile {
            relative_path,
            source_path: entry.path().to_path_buf(),
        });
    }

    files.sort_by_cached_key(|file| to_slash(&file.relative_path));
    Ok(files)
}

/// A preset held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryPreset {
    name: Option<String>,
    document: Option<String>,
    settings: Option<String>,
    files: BTreeMap<(Category, String), Vec<u8>>,
}

impl MemoryPreset {
    /// Create a preset with a display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the instruction document
    pub fn document(mut self, text: impl Into<String>) -> Self {
        self.document = Some(text.into());
        self
    }

    /// Set the raw settings text
    pub fn settings(mut self, text: impl Into<String>) -> Self {
        self.settings = Some(text.into());
        self
    }

    /// Add an auxiliary file; `relative_path` uses forward slashes
    pub fn file(
        mut self,
        category: Category,
        relative_path: impl Into<String>,
        content: impl AsRef<[u8]>,
    ) -> Self {
        self.files
            .insert((category, relative_path.into()), content.as_ref().to_vec());
        self
    }
}

/// In-memory preset source
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    presets: HashMap<String, MemoryPreset>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a preset under `slug`
    pub fn insert(&mut self, slug: impl Into<String>, preset: MemoryPreset) {
        self.presets.insert(slug.into(), preset);
    }

    /// Builder form of [`MemorySource::insert`]
    pub fn with(mut self, slug: impl Into<String>, preset: MemoryPreset) -> Self {
        self.insert(slug, preset);
        self
    }

    /// Number of presets held
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the source holds no presets
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    fn source_path(slug: &str, category: Category, relative: &str) -> PathBuf {
        Path::new(slug).join(category.dir_name()).join(relative)
    }
}

impl PresetSource for MemorySource {
    fn exists(&self, slug: &str) -> bool {
        self.presets.contains_key(slug)
    }

    fn document(&self, slug: &str) -> Option<String> {
        self.presets.get(slug)?.document.clone()
    }

    fn settings(&self, slug: &str) -> Option<String> {
        self.presets.get(slug)?.settings.clone()
    }

    fn display_name(&self, slug: &str) -> Option<String> {
        self.presets.get(slug)?.name.clone()
    }

    fn auxiliary_files(&self, slug: &str, category: Category) -> Result<Vec<AuxiliaryFile>> {
        let Some(preset) = self.presets.get(slug) else {
            return Ok(Vec::new());
        };

        Ok(preset
            .files
            .keys()
            .filter(|(file_category, _)| *file_category == category)
            .filter(|(_, relative)| !relative.split('/').any(is_hidden))
            .map(|(_, relative)| AuxiliaryFile {
                relative_path: PathBuf::from(relative),
                source_path: Self::source_path(slug, category, relative),
            })
            .collect())
    }

    fn read_auxiliary(&self, file: &AuxiliaryFile) -> Result<Vec<u8>> {
        for (slug, preset) in &self.presets {
            for ((category, relative), content) in &preset.files {
                if Self::source_path(slug, *category, relative) == file.source_path {
                    return Ok(content.clone());
                }
            }
        }

        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no in-memory file at {}", file.source_path.display()),
        )))
    }
}
