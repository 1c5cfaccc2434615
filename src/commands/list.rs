//! # List Command Implementation
//!
//! Lists every stored preset with its description and tags. This is also what
//! `modo` runs when no subcommand is given.

use anyhow::{Context as _, Result};
use clap::Args;

use crate::commands::Context;

/// List all presets
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Print slugs only, one per line
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, ctx: &Context) -> Result<()> {
    let presets = ctx.store.list_all().with_context(|| {
        format!(
            "Failed to read preset store at {}",
            ctx.store.root().display()
        )
    })?;

    if args.quiet {
        for (slug, _) in &presets {
            println!("{}", slug);
        }
        return Ok(());
    }

    println!();
    if presets.is_empty() {
        println!("  No presets yet. Create one with:");
        println!("    modo new my-preset");
        println!();
        return Ok(());
    }

    println!("  {} ({})", ctx.out.heading("Presets"), presets.len());
    println!();
    for (slug, info) in &presets {
        let mut line = format!("  {:<20}", slug);
        if !info.description.is_empty() {
            line.push_str(&ctx.out.dim(&info.description));
        }
        if !info.tags.is_empty() {
            let tags: Vec<String> = info.tags.iter().map(|tag| format!("[{}]", tag)).collect();
            line.push_str("  ");
            line.push_str(&ctx.out.dim(&tags.join(" ")));
        }
        println!("{}", line.trim_end());
    }
    println!();
    Ok(())
}
