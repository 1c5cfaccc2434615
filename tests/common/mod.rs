//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_preset("base", "Base", "Be concise.");
//!     fixture.command().args(["apply", "base"]).assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// An isolated preset store plus an empty project directory.
///
/// Commands created through [`TestFixture::command`] run inside the project
/// with `MODO_STORE` pointing at the fixture's store, so tests never touch the
/// real `~/.config/modo`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a fixture with an empty store and an empty project.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("store")
            .create_dir_all()
            .expect("Failed to create store");
        temp_dir
            .child("project")
            .create_dir_all()
            .expect("Failed to create project");
        Self { temp_dir }
    }

    /// Add a preset with a display name and document.
    pub fn with_preset(self, slug: &str, name: &str, document: &str) -> Self {
        let metadata = serde_json::json!({
            "name": name,
            "description": "",
            "tags": [],
        });
        self.store_child(&format!("{}/preset.json", slug))
            .write_str(&metadata.to_string())
            .expect("Failed to write preset metadata");
        self.store_child(&format!("{}/claude.md", slug))
            .write_str(document)
            .expect("Failed to write preset document");
        self
    }

    /// Add a file inside an existing preset, e.g. `settings.json` or `commands/x.md`.
    pub fn with_preset_file(self, slug: &str, path: &str, content: &str) -> Self {
        self.store_child(&format!("{}/{}", slug, path))
            .write_str(content)
            .expect("Failed to write preset file");
        self
    }

    /// Add a file to the project directory.
    pub fn with_project_file(self, path: &str, content: &str) -> Self {
        self.project_child(path)
            .write_str(content)
            .expect("Failed to write project file");
        self
    }

    /// Root of the fixture.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The preset store directory.
    pub fn store_path(&self) -> PathBuf {
        self.temp_dir.path().join("store")
    }

    /// The project directory commands run in.
    pub fn project_path(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    pub fn store_child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child("store").child(path)
    }

    pub fn project_child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child("project").child(path)
    }

    /// Create a `modo` command bound to this fixture.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("modo");
        cmd.current_dir(self.project_path())
            .env("MODO_STORE", self.store_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = TestFixture::new();
        assert!(fixture.store_path().is_dir());
        assert!(fixture.project_path().is_dir());
    }

    #[test]
    fn test_fixture_with_preset() {
        let fixture = TestFixture::new()
            .with_preset("base", "Base", "Be concise.")
            .with_preset_file("base", "commands/review.md", "Review.");
        assert!(fixture.store_path().join("base/preset.json").is_file());
        assert!(fixture.store_path().join("base/commands/review.md").is_file());
    }
}
