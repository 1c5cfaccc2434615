//! # Output Configuration
//!
//! Controls how the CLI decorates its output: colors, status markers and the
//! rendering of an [`ApplyResult`] summary.
//!
//! Color is decided once, from the `--color` flag and the environment:
//! - `--color=always|never|auto`
//! - `NO_COLOR` disables colors when set (https://no-color.org/)
//! - `CLICOLOR=0` disables colors
//! - `CLICOLOR_FORCE=1` forces colors even in non-TTY
//! - `TERM=dumb` disables colors
//!
//! Without color, markers fall back to plain ASCII tags so output stays
//! greppable.

use std::env;

use console::Style;

use crate::apply::ApplyResult;

/// Output configuration for controlling colors and markers.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and symbols should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Build the configuration from the value of `--color` and the environment.
    ///
    /// `always` wins over `NO_COLOR`; anything other than `always` or `never`
    /// means auto-detection.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// Apply `style` to `text` when colors are on
    pub fn paint(&self, style: &Style, text: &str) -> String {
        if self.use_color {
            style.apply_to(text).force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }

    /// `✓ text` in green, or `[OK] text`
    pub fn success(&self, text: &str) -> String {
        format!(
            "{} {}",
            self.paint(&Style::new().green(), marker(self, "✓", "[OK]")),
            text
        )
    }

    /// `⚠ text` in yellow, or `[WARN] text`
    pub fn warning(&self, text: &str) -> String {
        format!(
            "{} {}",
            self.paint(&Style::new().yellow(), marker(self, "⚠", "[WARN]")),
            text
        )
    }

    /// `• text` dimmed, or `- text`
    pub fn item(&self, text: &str) -> String {
        format!(
            "{} {}",
            self.paint(&Style::new().dim(), marker(self, "•", "-")),
            text
        )
    }

    /// Bold heading
    pub fn heading(&self, text: &str) -> String {
        self.paint(&Style::new().bold(), text)
    }

    /// Dimmed secondary text
    pub fn dim(&self, text: &str) -> String {
        self.paint(&Style::new().dim(), text)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the symbol when colors are enabled, the plain tag otherwise.
pub fn marker<'a>(config: &OutputConfig, symbol: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        symbol
    } else {
        plain
    }
}

/// Render the human-readable summary of an apply
///
/// Lines are grouped as backups, created, modified, overwrites and copied
/// files. Merged files carry their contributor counts.
pub fn render_apply_summary(config: &OutputConfig, result: &ApplyResult) -> Vec<String> {
    let mut lines = Vec::new();
    let (create_verb, modify_verb, backup_verb, copy_verb) = if result.dry_run {
        ("Would create", "Would modify", "Would back up", "Would copy")
    } else {
        ("Created", "Modified", "Backed up", "Copied")
    };

    for path in &result.backed_up {
        lines.push(config.item(&format!("{} {}", backup_verb, path)));
    }
    for path in &result.created {
        lines.push(config.success(&format!(
            "{} {}{}",
            create_verb,
            path,
            merge_note(result, path)
        )));
    }
    for path in &result.modified {
        lines.push(config.success(&format!(
            "{} {}{}",
            modify_verb,
            path,
            merge_note(result, path)
        )));
    }
    for overwrite in &result.overwritten {
        lines.push(config.warning(&format!(
            "{} from '{}' overwritten by '{}'",
            overwrite.path, overwrite.displaced, overwrite.winner
        )));
    }
    for path in &result.copied {
        lines.push(config.success(&format!("{} {}", copy_verb, path)));
    }

    lines
}

fn merge_note(result: &ApplyResult, path: &str) -> String {
    if path.ends_with("/claude.md") {
        format!(" ({} section(s))", result.section_count)
    } else if path.ends_with("/settings.json") {
        format!(" (merged from {} preset(s))", result.settings_preset_count)
    } else {
        String::new()
    }
}
