//! End-to-end tests for preset management: `new`, `list`, `show`, `edit`,
//! `remove`, `export`, `import` and `completions`.

mod common;
use common::prelude::*;

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_no_subcommand_lists_presets() {
    TestFixture::new()
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("No presets yet"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_new_then_list() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args([
            "new",
            "Swift App",
            "--description",
            "Base config for Swift projects",
            "--tags",
            "swift,ios",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created preset Swift App"))
        .stdout(predicate::str::contains("modo edit swift-app"));

    fixture
        .store_child("swift-app/preset.json")
        .assert(predicate::str::contains("\"Swift App\""));
    fixture.store_child("swift-app/claude.md").assert("");

    fixture
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Presets (1)"))
        .stdout(predicate::str::contains("swift-app"))
        .stdout(predicate::str::contains("Base config for Swift projects"))
        .stdout(predicate::str::contains("[swift] [ios]"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_new_duplicate_fails() {
    let fixture = TestFixture::new().with_preset("base", "base", "");

    fixture
        .command()
        .args(["new", "Base"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_new_from_project() {
    let fixture = TestFixture::new()
        .with_project_file(".claude/claude.md", "Project instructions.")
        .with_project_file(".claude/commands/deploy.md", "Deploy.");

    fixture
        .command()
        .args(["new", "from-project", "--from", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported preset"));

    fixture
        .store_child("from-project/claude.md")
        .assert("Project instructions.");
    fixture
        .store_child("from-project/commands/deploy.md")
        .assert("Deploy.");
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_show_preset() {
    let fixture = TestFixture::new()
        .with_preset("base", "Base", "Line one.\nLine two.")
        .with_preset_file("base", "settings.json", "{\"a\": 1}")
        .with_preset_file("base", "commands/review.md", "Review.")
        .with_preset_file("base", "skills/explain/SKILL.md", "Explain.")
        .with_preset_file("base", "rules/swift.md", "Rules.");

    fixture
        .command()
        .args(["show", "base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Line two."))
        .stdout(predicate::str::contains("settings.json"))
        .stdout(predicate::str::contains("/review"))
        .stdout(predicate::str::contains("explain/SKILL.md"))
        .stdout(predicate::str::contains("swift.md"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_show_missing_preset() {
    TestFixture::new()
        .command()
        .args(["show", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Preset 'ghost' not found"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_edit_path_prints_folder() {
    let fixture = TestFixture::new().with_preset("base", "Base", "");

    fixture
        .command()
        .args(["edit", "base", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("base\n"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_edit_settings_seeds_file_and_runs_editor() {
    let fixture = TestFixture::new().with_preset("base", "Base", "");

    fixture
        .command()
        .args(["edit", "base", "--settings"])
        .env("VISUAL", "true")
        .assert()
        .success();

    fixture.store_child("base/settings.json").assert("{}\n");
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_remove_with_force() {
    let fixture = TestFixture::new().with_preset("old", "Old", "");

    fixture
        .command()
        .args(["remove", "old", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed preset"));

    fixture
        .store_child("old")
        .assert(predicate::path::missing());
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_export_and_import() {
    let fixture = TestFixture::new()
        .with_preset("shared", "Shared", "Shared instructions.")
        .with_preset_file("shared", "rules/style.md", "Style.");

    fixture
        .command()
        .args(["export", "shared"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shared.modopreset"));
    fixture
        .project_child("shared.modopreset")
        .assert(predicate::path::is_file());

    fixture
        .command()
        .args(["import", "shared.modopreset"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fixture
        .command()
        .args(["remove", "shared", "--force"])
        .assert()
        .success();
    fixture
        .command()
        .args(["import", "shared.modopreset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported preset Shared"));

    fixture
        .store_child("shared/claude.md")
        .assert("Shared instructions.");
    fixture.store_child("shared/rules/style.md").assert("Style.");
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_import_rejects_garbage() {
    let fixture = TestFixture::new().with_project_file("bad.modopreset", "not a bundle");

    fixture
        .command()
        .args(["import", "bad.modopreset"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a preset bundle"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_completions_bash() {
    TestFixture::new()
        .command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("modo"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_store_flag_overrides_env() {
    let fixture = TestFixture::new();
    let other = fixture.path().join("other-store");

    fixture
        .command()
        .arg("--store")
        .arg(&other)
        .args(["new", "elsewhere"])
        .assert()
        .success();

    assert!(other.join("elsewhere/preset.json").is_file());
    fixture
        .store_child("elsewhere")
        .assert(predicate::path::missing());
}
