//! # Export Command Implementation
//!
//! Packs a preset into a single `<slug>.modopreset` file that can be shared
//! and later brought back with `modo import`.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use modo::archive::BundleArchiver;

use crate::commands::Context;

/// Export a preset as a shareable file
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Name of the preset to export
    pub name: String,

    /// Directory to save the bundle in (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub to: Option<PathBuf>,
}

/// Execute the `export` command.
pub fn execute(args: ExportArgs, ctx: &Context) -> Result<()> {
    let dest_dir = match args.to {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };

    let bundle = ctx
        .store
        .export(&args.name, &dest_dir, &BundleArchiver)
        .map_err(|e| ctx.explain(e))?;
    let file_name = bundle
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    println!();
    println!(
        "{}",
        ctx.out.success(&format!(
            "Exported {} to {}",
            ctx.out.heading(&args.name),
            file_name
        ))
    );
    println!("  Path: {}", bundle.display());
    println!();
    println!("  Share this file. Others can import it with:");
    println!("    modo import {}", file_name);
    println!();
    Ok(())
}
