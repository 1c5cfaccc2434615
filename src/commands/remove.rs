//! # Remove Command Implementation
//!
//! Deletes a preset after an interactive confirmation, unless `--force` is
//! given.

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::commands::Context;

/// Delete a preset
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Name of the preset to remove
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Execute the `remove` command.
pub fn execute(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let info = ctx.store.read_info(&args.name).map_err(|e| ctx.explain(e))?;

    if !args.force {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Remove preset \"{}\"? This cannot be undone.",
                info.name
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    ctx.store.delete(&args.name).map_err(|e| ctx.explain(e))?;
    println!();
    println!(
        "{}",
        ctx.out
            .success(&format!("Removed preset {}", ctx.out.heading(&info.name)))
    );
    println!();
    Ok(())
}
