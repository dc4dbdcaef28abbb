//! Command-line interface wiring for ae-triage.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod analyze;
pub mod serve;
pub mod vocabulary;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Adverse event triage assistant", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Analyze(args) => analyze::run(args, settings).await,
            Commands::Vocabulary => vocabulary::run(settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the JSON API.
    Serve(serve::Args),
    /// Analyse one transcript or entity list and print the result as JSON.
    Analyze(analyze::Args),
    /// Print the active high-risk condition vocabulary.
    Vocabulary,
}
