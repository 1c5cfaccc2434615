//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use modo::defaults::default_store_root;
use modo::output::OutputConfig;
use modo::store::PresetStore;

use crate::commands::{self, Context};

/// modo - Manage and apply reusable Claude configuration presets
///
/// Presets are stored in ~/.config/modo/presets/ unless --store or MODO_STORE
/// points elsewhere.
#[derive(Parser, Debug)]
#[command(name = "modo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `list`)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Preset store directory
    #[arg(long, global = true, value_name = "DIR", env = "MODO_STORE")]
    store: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new preset, empty or from an existing project
    New(commands::new::NewArgs),

    /// List all presets
    List(commands::list::ListArgs),

    /// Preview a preset's contents
    Show(commands::show::ShowArgs),

    /// Apply one or more presets to a project
    Apply(commands::apply::ApplyArgs),

    /// Open a preset's document or settings in your editor
    Edit(commands::edit::EditArgs),

    /// Delete a preset
    Remove(commands::remove::RemoveArgs),

    /// Export a preset as a shareable .modopreset file
    Export(commands::export::ExportArgs),

    /// Import a preset from a .modopreset file
    Import(commands::import::ImportArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let ctx = Context {
            store: PresetStore::new(self.store.unwrap_or_else(default_store_root)),
            out: OutputConfig::from_env_and_flag(&self.color),
        };
        log::debug!("Using preset store at {}", ctx.store.root().display());

        match self.command {
            None => commands::list::execute(commands::list::ListArgs::default(), &ctx),
            Some(Commands::New(args)) => commands::new::execute(args, &ctx),
            Some(Commands::List(args)) => commands::list::execute(args, &ctx),
            Some(Commands::Show(args)) => commands::show::execute(args, &ctx),
            Some(Commands::Apply(args)) => commands::apply::execute(args, &ctx),
            Some(Commands::Edit(args)) => commands::edit::execute(args, &ctx),
            Some(Commands::Remove(args)) => commands::remove::execute(args, &ctx),
            Some(Commands::Export(args)) => commands::export::execute(args, &ctx),
            Some(Commands::Import(args)) => commands::import::execute(args, &ctx),
            Some(Commands::Completions(args)) => commands::completions::execute(args),
        }
    }
}

/// Route `log` records to stderr at the requested level; `RUST_LOG` wins when set
fn init_logging(level: &str) {
    let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Warn);

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(filter)
        .format_timestamp(None)
        .format_target(false);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A logger may already be installed when running under a test harness
    let _ = builder.try_init();
}
