//! Apply provenance
//!
//! After a real apply the engine records which presets were applied, when, and
//! by which version, in `.claude/.modo.json`. The record is replaced wholesale
//! on every apply.

use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::write::write_atomic;
use crate::defaults::{APPLY_RECORD_FILENAME, MANAGED_DIR, VERSION};
use crate::error::Result;

/// What was last applied to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRecord {
    /// ISO-8601 UTC timestamp
    pub applied_at: String,
    pub modo_version: String,
    /// Applied slugs, in apply order
    pub presets: Vec<String>,
}

impl ApplyRecord {
    /// A record for `presets` stamped with the current time and crate version
    pub fn now(presets: &[String]) -> Self {
        Self {
            applied_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            modo_version: VERSION.to_string(),
            presets: presets.to_vec(),
        }
    }

    /// Read the record of `project`, `None` if it was never applied to
    pub fn load(project: &Path) -> Result<Option<Self>> {
        let path = project.join(MANAGED_DIR).join(APPLY_RECORD_FILENAME);
        if !path.is_file() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    /// Write the record into `project`'s managed directory
    pub fn save(&self, project: &Path) -> Result<()> {
        let path = project.join(MANAGED_DIR).join(APPLY_RECORD_FILENAME);
        let mut data = serde_json::to_string_pretty(self)?;
        data.push('\n');
        write_atomic(&path, data.as_bytes())
    }
}
