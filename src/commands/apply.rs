//! # Apply Command Implementation
//!
//! Merges the selected presets into a project's `.claude/` directory:
//! - documents are compiled with one section per preset
//! - settings are deep-merged (permission lists combined, not overwritten)
//! - `commands/`, `skills/` and `rules/` trees are copied, later presets winning
//! - `.gitignore` is updated to include `.claude/`
//!
//! Files that already exist are backed up to `<file>.bak` first.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use modo::apply::Engine;
use modo::output::render_apply_summary;
use modo::path::slugify;

use crate::commands::Context;

/// Apply one or more presets to a project
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Names of presets to apply, lowest priority first
    #[arg(required = true, value_name = "PRESET")]
    pub presets: Vec<String>,

    /// Project directory to apply to (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub to: Option<PathBuf>,

    /// Show what would happen without writing any files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the result as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Execute the `apply` command.
pub fn execute(args: ApplyArgs, ctx: &Context) -> Result<()> {
    let slugs: Vec<String> = args.presets.iter().map(|name| slugify(name)).collect();

    let target = match args.to {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };

    let display_names: Vec<String> = slugs
        .iter()
        .map(|slug| {
            ctx.store
                .read_info(slug)
                .map(|info| info.name)
                .unwrap_or_else(|_| slug.clone())
        })
        .collect();

    let result = Engine::new(&ctx.store)
        .apply(&slugs, &target, args.dry_run)
        .map_err(|e| ctx.explain(e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    if args.dry_run {
        println!(
            "  {} no files will be changed.",
            ctx.out.warning("Dry run:")
        );
        println!();
    }
    println!(
        "  Applying {} preset(s) to {}...",
        slugs.len(),
        ctx.out.dim(&target.display().to_string())
    );
    println!();

    for line in render_apply_summary(&ctx.out, &result) {
        println!("  {}", line);
    }

    println!();
    if args.dry_run {
        println!(
            "  {}",
            ctx.out
                .dim("No files were changed. Remove --dry-run to apply for real.")
        );
    } else {
        println!("  Done! Applied: {}", display_names.join(", "));
    }
    println!();
    Ok(())
}
