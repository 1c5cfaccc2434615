//! # Edit Command Implementation
//!
//! Opens a preset's document (or settings) in the user's editor, taken from
//! `$VISUAL`, then `$EDITOR`, falling back to `vi`.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context as _, Result};
use clap::Args;

use modo::defaults::{DOCUMENT_FILENAME, SETTINGS_FILENAME};

use crate::commands::Context;

/// Open a preset in your editor
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Name of the preset to edit
    pub name: String,

    /// Open settings.json instead of claude.md
    #[arg(long)]
    pub settings: bool,

    /// Print the preset folder instead of opening an editor
    #[arg(long)]
    pub path: bool,
}

/// Execute the `edit` command.
pub fn execute(args: EditArgs, ctx: &Context) -> Result<()> {
    if !ctx.store.exists(&args.name) {
        return Err(ctx.explain(modo::Error::PresetNotFound {
            name: args.name.clone(),
        }));
    }
    let preset_dir = ctx.store.preset_dir(&args.name);

    if args.path {
        println!("{}", preset_dir.display());
        return Ok(());
    }

    let file = if args.settings {
        let settings = preset_dir.join(SETTINGS_FILENAME);
        if !settings.exists() {
            fs::write(&settings, "{}\n")
                .with_context(|| format!("Failed to create {}", settings.display()))?;
        }
        settings
    } else {
        preset_dir.join(DOCUMENT_FILENAME)
    };

    open_in_editor(&editor_command(), &file)
}

/// The editor to launch: `$VISUAL`, then `$EDITOR`, then `vi`
fn editor_command() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

fn open_in_editor(editor: &str, file: &Path) -> Result<()> {
    // Editors are often configured with flags, e.g. "code --wait"
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("No editor configured\n\nhint: Set the EDITOR environment variable");
    };

    log::debug!("Launching {} for {}", editor, file.display());
    let status = Command::new(program)
        .args(parts)
        .arg(file)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", program))?;

    if !status.success() {
        bail!("Editor '{}' exited with {}", program, status);
    }
    Ok(())
}
