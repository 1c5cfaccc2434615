//! Writing and backing up files under the target
//!
//! Every write goes to a temporary file in the destination's directory and is
//! then renamed over the destination, so a reader never sees a half-written
//! file.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::defaults::BACKUP_SUFFIX;
use crate::error::Result;

/// Atomically replace `path` with `content`, creating parent directories
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    staged.write_all(content)?;
    staged.flush()?;
    staged.persist(path).map_err(std::io::Error::from)?;
    Ok(())
}

/// The sibling path holding the backup of `path`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy `path` to its backup sibling, replacing any earlier backup
pub fn backup(path: &Path) -> Result<PathBuf> {
    let bak = backup_path(path);
    if bak.exists() {
        fs::remove_file(&bak)?;
    }
    fs::copy(path, &bak)?;
    Ok(bak)
}
