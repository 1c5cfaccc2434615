//! # CLI Command Implementations
//!
//! One module per `modo` subcommand. Each holds an `Args` struct derived with
//! `clap` and an `execute` function that does the work through the `modo`
//! library, with the shared [`Context`].

use modo::output::OutputConfig;
use modo::store::PresetStore;

pub mod apply;
pub mod completions;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod new;
pub mod remove;
pub mod show;

/// State shared by every subcommand
pub struct Context {
    pub store: PresetStore,
    pub out: OutputConfig,
}

impl Context {
    /// Slugs of every stored preset, for "did you mean" hints
    pub fn known_slugs(&self) -> Vec<String> {
        self.store
            .list_all()
            .map(|presets| presets.into_iter().map(|(slug, _)| slug).collect())
            .unwrap_or_default()
    }

    /// Turn a library error into a hinted CLI error
    pub fn explain(&self, error: modo::Error) -> anyhow::Error {
        modo::suggestions::explain(error, &self.known_slugs())
    }
}
