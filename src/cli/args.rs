//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    bom::BomArgs, catalog::CatalogCommands, completions::CompletionsArgs, config::ConfigCommands,
    validate::ValidateArgs,
};
use crate::entities::catalog_item::{Finish, PartCategory};

#[derive(Parser)]
#[command(name = "ebom")]
#[command(author, version, about = "Enclosure BOM configurator")]
#[command(long_about = "Resolve a parametric enclosure module (width, height, finish) to catalog parts and quantities.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Catalog file (default: configured catalog, then the built-in one)
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve module parameters to a bill of materials
    Bom(BomArgs),

    /// Browse and query the parts catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Validate a catalog file for authoring defects
    Validate(ValidateArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (configured default, else tsv)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for reading)
    Tsv,
    /// JSON format (for programming and the clipboard)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just part numbers, one per line
    Id,
}

/// Finish choice for commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliFinish {
    Metal,
    Wood,
}

impl From<CliFinish> for Finish {
    fn from(f: CliFinish) -> Self {
        match f {
            CliFinish::Metal => Finish::Metal,
            CliFinish::Wood => Finish::Wood,
        }
    }
}

/// Category choice for commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliCategory {
    Panel,
    Edge,
    Connector,
    Hardware,
}

impl From<CliCategory> for PartCategory {
    fn from(c: CliCategory) -> Self {
        match c {
            CliCategory::Panel => PartCategory::Panel,
            CliCategory::Edge => PartCategory::Edge,
            CliCategory::Connector => PartCategory::Connector,
            CliCategory::Hardware => PartCategory::Hardware,
        }
    }
}
