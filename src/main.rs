//! # modo CLI
//!
//! Binary entry point for the `modo` command-line tool.
//!
//! It parses arguments with `clap`, dispatches to a subcommand and lets
//! `anyhow` report any error (with its hints) on stderr. The preset store,
//! merge algorithms and apply engine all live in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
