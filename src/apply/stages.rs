//! The individual apply stages
//!
//! An [`ApplyRun`] lives for exactly one [`super::Engine::apply`] call and owns
//! the result being built, the per-call conflict map and the set of paths the
//! call has written (or would write, on a dry run).

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::ignore::{self, IgnorePatch};
use super::record::ApplyRecord;
use super::write::{backup, backup_path, write_atomic};
use super::{ApplyResult, Overwrite};
use crate::defaults::{DOCUMENT_FILENAME, IGNORE_FILENAME, MANAGED_DIR, SETTINGS_FILENAME};
use crate::error::Result;
use crate::merge::json::{deep_merge, to_canonical_string, SettingsMap, SettingsValue};
use crate::merge::markdown::{compile_document, DocumentSection};
use crate::path::{is_contained, to_slash};
use crate::source::{Category, PresetSource};

pub(super) struct ApplyRun<'a> {
    source: &'a dyn PresetSource,
    slugs: &'a [String],
    target: &'a Path,
    dry_run: bool,
    result: ApplyResult,
    /// Target-relative paths written by this call, backups included
    written: HashSet<String>,
}

impl<'a> ApplyRun<'a> {
    pub(super) fn new(
        source: &'a dyn PresetSource,
        slugs: &'a [String],
        target: &'a Path,
        dry_run: bool,
    ) -> Self {
        Self {
            source,
            slugs,
            target,
            dry_run,
            result: ApplyResult {
                dry_run,
                ..ApplyResult::default()
            },
            written: HashSet::new(),
        }
    }

    pub(super) fn execute(mut self) -> Result<ApplyResult> {
        self.bootstrap()?;
        self.compile_document()?;
        self.merge_settings()?;
        self.copy_assets()?;
        self.patch_ignore()?;
        if !self.dry_run {
            ApplyRecord::now(self.slugs).save(self.target)?;
        }
        Ok(self.result)
    }

    fn bootstrap(&mut self) -> Result<()> {
        let managed = self.target.join(MANAGED_DIR);
        if !managed.is_dir() {
            if !self.dry_run {
                fs::create_dir_all(&managed)?;
            }
            self.result.created.push(format!("{}/", MANAGED_DIR));
        }
        Ok(())
    }

    fn compile_document(&mut self) -> Result<()> {
        let sections: Vec<DocumentSection> = self
            .slugs
            .iter()
            .filter_map(|slug| {
                let content = self.source.document(slug)?;
                let name = self
                    .source
                    .display_name(slug)
                    .unwrap_or_else(|| slug.clone());
                let section = DocumentSection::new(name, content);
                (!section.is_blank()).then_some(section)
            })
            .collect();

        if sections.is_empty() {
            debug!("No preset documents to compile");
            return Ok(());
        }

        self.result.section_count = sections.len();
        let compiled = compile_document(&sections);
        let relative = managed_path(DOCUMENT_FILENAME);
        self.replace_file(&relative, compiled.as_bytes())
    }

    fn merge_settings(&mut self) -> Result<()> {
        let relative = managed_path(SETTINGS_FILENAME);
        let path = self.target.join(&relative);

        let mut merged = match fs::read_to_string(&path) {
            Ok(text) => match SettingsValue::parse(&text, &relative) {
                Ok(existing) => existing.unwrap_or_default(),
                Err(err) => {
                    warn!("{}; starting from empty settings", err);
                    SettingsMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => SettingsMap::new(),
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                warn!(
                    "Could not read {}: {}; starting from empty settings",
                    relative, err
                );
                SettingsMap::new()
            }
            Err(err) => return Err(err.into()),
        };

        let mut contributors = 0;
        for slug in self.slugs {
            let Some(text) = self.source.settings(slug) else {
                continue;
            };
            match SettingsValue::parse(&text, &format!("preset '{}'", slug)) {
                Ok(Some(overlay)) => {
                    merged = deep_merge(merged, overlay);
                    contributors += 1;
                }
                Ok(None) => {}
                Err(err) => warn!("{}; skipping", err),
            }
        }
        self.result.settings_preset_count = contributors;

        if merged.is_empty() {
            debug!("No settings to write");
            return Ok(());
        }

        let rendered = to_canonical_string(&merged)?;
        self.replace_file(&relative, rendered.as_bytes())
    }

    fn copy_assets(&mut self) -> Result<()> {
        // (category, relative path) -> slug that placed it during this call
        let mut placed: HashMap<(Category, PathBuf), &'a str> = HashMap::new();
        let mut copied: HashSet<String> = HashSet::new();

        for category in Category::ALL {
            let category_dir = self.target.join(MANAGED_DIR).join(category.dir_name());
            let mut category_ready = category_dir.is_dir();

            for slug in self.slugs {
                for file in self.source.auxiliary_files(slug, category)? {
                    if !is_contained(&file.relative_path) {
                        warn!(
                            "Skipping '{}' from preset '{}': path leaves the {} directory",
                            file.relative_path.display(),
                            slug,
                            category
                        );
                        continue;
                    }

                    if !category_ready {
                        if !self.dry_run {
                            fs::create_dir_all(&category_dir)?;
                        }
                        self.result
                            .created
                            .push(format!("{}/{}/", MANAGED_DIR, category.dir_name()));
                        category_ready = true;
                    }

                    let relative = format!(
                        "{}/{}/{}",
                        MANAGED_DIR,
                        category.dir_name(),
                        to_slash(&file.relative_path)
                    );
                    let destination = self.target.join(&relative);

                    let key = (category, file.relative_path.clone());
                    if let Some(previous) = placed.insert(key, slug.as_str()) {
                        self.result.overwritten.push(Overwrite {
                            path: relative.clone(),
                            displaced: previous.to_string(),
                            winner: slug.clone(),
                        });
                    } else if destination.is_file() && !self.written.contains(&relative) {
                        self.backup(&destination, &relative)?;
                    }

                    if !self.dry_run {
                        let content = self.source.read_auxiliary(&file)?;
                        write_atomic(&destination, &content)?;
                    }
                    self.written.insert(relative.clone());

                    if copied.insert(relative.clone()) {
                        self.result.copied.push(relative);
                    }
                }
            }
        }

        Ok(())
    }

    fn patch_ignore(&mut self) -> Result<()> {
        let path = self.target.join(IGNORE_FILENAME);
        let existing = if path.is_file() {
            Some(fs::read_to_string(&path)?)
        } else {
            None
        };

        match ignore::plan(existing.as_deref()) {
            IgnorePatch::Unchanged => {}
            IgnorePatch::Append(content) => {
                if !self.dry_run {
                    write_atomic(&path, content.as_bytes())?;
                }
                self.result.modified.push(IGNORE_FILENAME.to_string());
            }
            IgnorePatch::Create(content) => {
                if !self.dry_run {
                    write_atomic(&path, content.as_bytes())?;
                }
                self.result.created.push(IGNORE_FILENAME.to_string());
            }
        }
        Ok(())
    }

    /// Back up (if present) and write one of the merged managed files
    fn replace_file(&mut self, relative: &str, content: &[u8]) -> Result<()> {
        let path = self.target.join(relative);
        let existed = path.is_file();

        if existed {
            self.backup(&path, relative)?;
        }
        if !self.dry_run {
            write_atomic(&path, content)?;
        }
        self.written.insert(relative.to_string());

        if existed {
            self.result.modified.push(relative.to_string());
        } else {
            self.result.created.push(relative.to_string());
        }
        Ok(())
    }

    fn backup(&mut self, path: &Path, relative: &str) -> Result<()> {
        if !self.dry_run {
            backup(path)?;
        }
        let bak = to_slash(&backup_path(Path::new(relative)));
        self.written.insert(bak.clone());
        self.result.backed_up.push(bak);
        Ok(())
    }
}

fn managed_path(file_name: &str) -> String {
    format!("{}/{}", MANAGED_DIR, file_name)
}
