//! Default values and fixed names used by modo.
//!
//! This module centralizes the on-disk names that the preset store and the
//! apply engine agree on, so that neither side hard-codes them.

use std::path::PathBuf;

/// Version string recorded in every apply record.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Managed subdirectory created under every target project.
pub const MANAGED_DIR: &str = ".claude";

/// Combined instruction document, both inside a preset and under the managed dir.
pub const DOCUMENT_FILENAME: &str = "claude.md";

/// Alternative document location read by `new --from` when the managed one is absent.
pub const ROOT_DOCUMENT_FILENAME: &str = "CLAUDE.md";

/// Structured settings document.
pub const SETTINGS_FILENAME: &str = "settings.json";

/// Preset metadata file.
pub const METADATA_FILENAME: &str = "preset.json";

/// Provenance record written after a real apply.
pub const APPLY_RECORD_FILENAME: &str = ".modo.json";

/// Ignore file patched by the apply engine.
pub const IGNORE_FILENAME: &str = ".gitignore";

/// Comment line written above the ignore-file entry.
pub const IGNORE_COMMENT: &str = "# modo managed configuration";

/// Suffix appended to a file name to form its backup sibling.
pub const BACKUP_SUFFIX: &str = ".bak";

/// File extension of exported preset bundles.
pub const BUNDLE_EXTENSION: &str = "modopreset";

/// Environment variable overriding the preset store location.
pub const STORE_ENV: &str = "MODO_STORE";

/// Returns the default preset store directory.
///
/// This is `~/.config/modo/presets` on every platform, matching where presets
/// have always been kept. Falls back to `.modo/presets` in the current
/// directory when no home directory can be determined.
///
/// Overridden by the `--store` CLI flag or the `MODO_STORE` environment variable.
pub fn default_store_root() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".config").join("modo").join("presets"),
        None => PathBuf::from(".modo").join("presets"),
    }
}

/// The entry the ignore file must contain: the managed directory plus a slash.
pub fn ignore_entry() -> String {
    format!("{}/", MANAGED_DIR)
}
