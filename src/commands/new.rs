//! # New Command Implementation
//!
//! Creates an empty preset, or seeds one from an existing project's `.claude/`
//! directory with `--from`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::commands::Context;

/// Create a new preset
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Name for the new preset
    pub name: String,

    /// Short description of what this preset is for
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Comma-separated tags (e.g. swift,ios,macos)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Import from an existing project's .claude/ directory
    #[arg(long, value_name = "DIR", conflicts_with_all = ["description", "tags"])]
    pub from: Option<PathBuf>,
}

/// Execute the `new` command.
pub fn execute(args: NewArgs, ctx: &Context) -> Result<()> {
    let tags: Vec<String> = args
        .tags
        .iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    let slug = match &args.from {
        Some(project) => {
            if !project.is_dir() {
                return Err(modo::suggestions::project_not_found(project));
            }
            let slug = ctx
                .store
                .create_from_project(&args.name, project)
                .map_err(|e| ctx.explain(e))?;
            println!();
            println!(
                "{}",
                ctx.out.success(&format!(
                    "Imported preset {} from {}",
                    ctx.out.heading(&args.name),
                    project.display()
                ))
            );
            slug
        }
        None => {
            let slug = ctx
                .store
                .create(&args.name, &args.description, &tags)
                .map_err(|e| ctx.explain(e))?;
            println!();
            println!(
                "{}",
                ctx.out
                    .success(&format!("Created preset {}", ctx.out.heading(&args.name)))
            );
            slug
        }
    };

    println!("  Location: {}", ctx.store.preset_dir(&slug).display());
    println!();
    println!("  Next steps:");
    println!("    modo edit {:<14} Edit the document", slug);
    println!("    modo apply {:<13} Apply it to a project", slug);
    println!();
    Ok(())
}
