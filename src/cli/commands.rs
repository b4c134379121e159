//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};

/// Setup orchestrator for the Kytos controller.
///
/// Reads package metadata without importing it and layers lint, test, clean
/// and developer-install commands on top of the external build toolchain.
#[derive(Parser, Debug)]
#[command(name = "kytos-setup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Project root the source paths resolve against (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install in development mode, linking config files to the source tree
    Develop,

    /// Run the linter on the build script, tests and package sources
    Lint,

    /// Clean build, dist, pyc and egg from package and docs
    Clean,

    /// Run the test suite, documentation examples and linter
    Test,

    /// Show the declared package metadata
    Metadata(MetadataArgs),

    /// List registered setup commands
    Commands(ListArgs),
}

impl Commands {
    /// Name in the command table, for the dispatched subcommands
    pub fn registered_name(&self) -> Option<&'static str> {
        match self {
            Commands::Develop => Some("develop"),
            Commands::Lint => Some("lint"),
            Commands::Clean => Some("clean"),
            Commands::Test => Some("test"),
            Commands::Metadata(_) | Commands::Commands(_) => None,
        }
    }
}

/// Arguments for the `metadata` subcommand
#[derive(Parser, Debug)]
pub struct MetadataArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the `commands` subcommand
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
    /// Plain text (one entry per line)
    Plain,
}
