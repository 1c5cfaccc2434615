//! # Error Handling
//!
//! This module defines the centralized error type for the `modo` library. It
//! uses `thiserror` to build a single `Error` enum covering every failure the
//! preset store, the archive bundler and the apply engine can report.
//!
//! ## Recovered versus propagated errors
//!
//! Most variants are propagated straight to the caller. `StructuralParse` is the
//! exception: the apply engine produces it when a settings document cannot be
//! parsed, logs it, and carries on with an empty contribution instead of
//! aborting. It is still a public variant so callers of
//! [`crate::merge::json::SettingsValue::parse`] can inspect the failure.
//!
//! The `Result` alias is used throughout the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for modo operations
#[derive(Error, Debug)]
pub enum Error {
    /// A preset slug could not be resolved against the preset source.
    #[error("Preset '{name}' not found")]
    PresetNotFound { name: String },

    /// A preset with the same slug already exists in the store.
    #[error("Preset '{name}' already exists")]
    PresetAlreadyExists { name: String },

    /// An apply request named no presets at all.
    #[error("No presets specified")]
    NoPresetsSpecified,

    /// A preset name normalizes to an empty slug.
    #[error("Invalid preset name '{name}': it must contain at least one letter, digit or hyphen")]
    InvalidPresetName { name: String },

    /// The apply target cannot be created or is not a directory.
    #[error("Target path '{}' is invalid: {message}", path.display())]
    TargetPathInvalid { path: PathBuf, message: String },

    /// A settings document is not a valid JSON object.
    ///
    /// The apply engine recovers from this locally; it never aborts an apply.
    #[error("Could not parse settings from {source_name}: {message}")]
    StructuralParse {
        source_name: String,
        message: String,
    },

    /// A preset bundle could not be packed or unpacked.
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON encoding or decoding error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
