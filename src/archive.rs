//! # Preset Bundles
//!
//! Presets are shared as single-file bundles. Packaging sits behind the
//! [`Archiver`] trait so the store never depends on a particular format or
//! external tool.
//!
//! [`BundleArchiver`] writes a gzip-compressed JSON document:
//!
//! ```json
//! {
//!   "formatVersion": 1,
//!   "root": "swift-app",
//!   "files": { "preset.json": "<base64>", "commands/review.md": "<base64>" }
//! }
//! ```
//!
//! Unpacking recreates `<dest>/<root>/...`. Paths that are absolute or climb
//! out of the root are rejected.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::{is_contained, to_slash};
use crate::source::collect_files;

/// Current bundle format version
pub const BUNDLE_FORMAT_VERSION: u32 = 1;

/// Packs a directory into bytes and back
pub trait Archiver {
    /// Pack `dir` (and its name) into a single byte buffer
    fn pack(&self, dir: &Path) -> Result<Vec<u8>>;

    /// Unpack `bytes` under `dest`, recreating the packed directory inside it
    fn unpack(&self, bytes: &[u8], dest: &Path) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Bundle {
    format_version: u32,
    root: String,
    files: BTreeMap<String, String>,
}

/// Gzip-compressed JSON bundle format
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleArchiver;

impl Archiver for BundleArchiver {
    fn pack(&self, dir: &Path) -> Result<Vec<u8>> {
        let root = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Archive {
                message: format!("Cannot pack '{}': no directory name", dir.display()),
            })?;

        let mut files = BTreeMap::new();
        for file in collect_files(dir)? {
            let content = fs::read(&file.source_path)?;
            files.insert(to_slash(&file.relative_path), STANDARD.encode(content));
        }

        let bundle = Bundle {
            format_version: BUNDLE_FORMAT_VERSION,
            root,
            files,
        };

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        serde_json::to_writer(&mut encoder, &bundle)?;
        encoder.flush()?;
        Ok(encoder.finish()?)
    }

    fn unpack(&self, bytes: &[u8], dest: &Path) -> Result<()> {
        let mut json = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut json)
            .map_err(|err| Error::Archive {
                message: format!("Not a preset bundle: {}", err),
            })?;

        let bundle: Bundle = serde_json::from_slice(&json).map_err(|err| Error::Archive {
            message: format!("Corrupt preset bundle: {}", err),
        })?;

        if bundle.format_version != BUNDLE_FORMAT_VERSION {
            return Err(Error::Archive {
                message: format!(
                    "Unsupported bundle format version {}",
                    bundle.format_version
                ),
            });
        }

        let root = PathBuf::from(&bundle.root);
        if bundle.root.is_empty() || root.components().count() != 1 || !is_contained(&root) {
            return Err(Error::Archive {
                message: format!("Invalid bundle root '{}'", bundle.root),
            });
        }

        let base = dest.join(root);
        fs::create_dir_all(&base)?;
        for (relative, encoded) in bundle.files {
            let relative_path = PathBuf::from(&relative);
            if !is_contained(&relative_path) {
                return Err(Error::Archive {
                    message: format!("Refusing to unpack '{}' outside the bundle", relative),
                });
            }

            let content = STANDARD.decode(encoded).map_err(|err| Error::Archive {
                message: format!("Corrupt content for '{}': {}", relative, err),
            })?;

            let target = base.join(relative_path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, content)?;
        }

        Ok(())
    }
}
