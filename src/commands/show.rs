//! # Show Command Implementation
//!
//! Previews a preset: metadata, the head of its document and settings, and
//! the contents of its category directories.

use anyhow::Result;
use clap::Args;

use modo::source::Category;

use crate::commands::Context;

/// Lines of document and settings shown before truncating
const PREVIEW_LINES: usize = 15;

/// Preview a preset's contents
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Name of the preset to show
    pub name: String,
}

/// Execute the `show` command.
pub fn execute(args: ShowArgs, ctx: &Context) -> Result<()> {
    let info = ctx.store.read_info(&args.name).map_err(|e| ctx.explain(e))?;
    let out = &ctx.out;

    println!();
    println!("  {}", out.heading(&info.name));
    if !info.description.is_empty() {
        println!("  {}", out.dim(&info.description));
    }
    if !info.tags.is_empty() {
        println!("  Tags: {}", info.tags.join(", "));
    }

    if let Some(document) = ctx.store.read_document(&args.name) {
        print_preview(ctx, "claude.md", &document);
    }
    if let Some(settings) = ctx.store.read_settings(&args.name) {
        print_preview(ctx, "settings.json", &settings);
    }

    for category in Category::ALL {
        let entries = ctx.store.list_category(&args.name, category);
        if entries.is_empty() {
            continue;
        }
        println!();
        println!(
            "  {} ({})",
            out.heading(&format!("{}/", category)),
            entries.len()
        );
        for entry in entries {
            println!("    {}", entry_label(category, &entry));
        }
    }

    println!();
    Ok(())
}

fn print_preview(ctx: &Context, title: &str, content: &str) {
    if content.trim().is_empty() {
        return;
    }
    let (preview, remaining) = preview_lines(content);

    println!();
    println!("  {}", ctx.out.heading(title));
    for line in preview {
        println!("    {}", line);
    }
    if remaining > 0 {
        println!(
            "    {}",
            ctx.out.dim(&format!("... ({} more lines)", remaining))
        );
    }
}

/// The first lines of `content` and how many were left out
fn preview_lines(content: &str) -> (Vec<&str>, usize) {
    let lines: Vec<&str> = content.lines().collect();
    let remaining = lines.len().saturating_sub(PREVIEW_LINES);
    (lines.into_iter().take(PREVIEW_LINES).collect(), remaining)
}

fn entry_label(category: Category, entry: &str) -> String {
    match category {
        Category::Commands => format!("/{}", entry.strip_suffix(".md").unwrap_or(entry)),
        Category::Skills => format!("{}/SKILL.md", entry),
        Category::Rules => entry.to_string(),
    }
}
