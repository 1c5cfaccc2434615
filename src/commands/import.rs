//! # Import Command Implementation
//!
//! Adds a preset from a `.modopreset` bundle to the store.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use modo::archive::BundleArchiver;

use crate::commands::Context;

/// Import a preset from a bundle file
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the .modopreset file
    pub file: PathBuf,
}

/// Execute the `import` command.
pub fn execute(args: ImportArgs, ctx: &Context) -> Result<()> {
    if !args.file.is_file() {
        bail!(
            "File not found: {}\n\nhint: Export a preset with 'modo export <name>' first",
            args.file.display()
        );
    }

    let slug = ctx
        .store
        .import(&args.file, &BundleArchiver)
        .map_err(|e| ctx.explain(e))?;
    let info = ctx.store.read_info(&slug)?;

    println!();
    println!(
        "{}",
        ctx.out
            .success(&format!("Imported preset {}", ctx.out.heading(&info.name)))
    );
    println!("  Location: {}", ctx.store.preset_dir(&slug).display());
    println!();
    println!("  Next steps:");
    println!("    modo show {:<14} Preview its contents", slug);
    println!("    modo apply {:<13} Apply it to a project", slug);
    println!();
    Ok(())
}
