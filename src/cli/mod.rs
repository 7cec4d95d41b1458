//! CLI module for Remixer
//!
//! Running without a subcommand opens the GUI. The subcommands below drive
//! the same session logic headlessly.

mod commands;
mod output;
mod shell;

use clap::{Parser, Subcommand};

use crate::config::Config;

pub use output::OutputFormat;

/// Remixer - rewrite text in a different style
#[derive(Parser, Debug)]
#[command(name = "remixer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remix text once and print the result
    Remix(commands::remix::RemixArgs),

    /// List available remix styles
    Styles,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Interactive remix session
    Shell,
}

/// Run a CLI subcommand
pub async fn run(command: Commands, config: &Config, output: &OutputOptions) -> anyhow::Result<()> {
    let format = output.format();
    let quiet = output.quiet;

    match command {
        Commands::Remix(args) => commands::remix::run(args, config, format).await,
        Commands::Styles => commands::styles::run(config, format),
        Commands::Config { command } => commands::config::run(command, config, format, quiet),
        Commands::Shell => shell::run(config, format).await,
    }
}
