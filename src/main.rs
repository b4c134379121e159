//! kytos-setup CLI entry point
//!
//! Usage:
//!   kytos-setup develop            Developer-mode install
//!   kytos-setup lint               Run the linter
//!   kytos-setup clean              Remove build artifacts
//!   kytos-setup test               Run tests, doctests and lint
//!   kytos-setup metadata           Show declared package metadata
//!   kytos-setup commands           List registered setup commands

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kytos_setup::cli::{
    commands::{ListArgs, MetadataArgs, OutputFormat},
    Cli, Commands,
};
use kytos_setup::config::load_config;
use kytos_setup::{Orchestrator, TaskError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let task_error = e.downcast_ref::<TaskError>();
            match task_error {
                // Tool failures print their stage's fixed diagnostic only
                Some(err @ TaskError::ToolFailed { .. }) => {
                    eprintln!("{}", err.to_string().red().bold())
                }
                _ => eprintln!("{}: {:#}", "error".red().bold(), e),
            }
            if let Some(suggestion) = task_error.and_then(TaskError::suggestion) {
                eprintln!("{}: {}", "hint".yellow(), suggestion);
            }
            ExitCode::from(task_error.map_or(1, TaskError::exit_code))
        }
    }
}

/// Logs go to stderr; RUST_LOG wins over --verbose
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let project_dir = match cli.project {
        Some(ref p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let config = load_config(cli.config.as_deref(), &project_dir)?;
    let mut orchestrator = Orchestrator::new(config, project_dir);

    if cli.verbose {
        eprintln!(
            "{}: {} (root {})",
            "project".cyan(),
            orchestrator.project_dir().display(),
            orchestrator.root()
        );
    }

    if let Some(name) = cli.command.registered_name() {
        orchestrator.run(name)?;
        return Ok(());
    }

    match cli.command {
        Commands::Metadata(args) => show_metadata(&orchestrator, args)?,
        Commands::Commands(args) => list_commands(&orchestrator, args)?,
        _ => {}
    }

    Ok(())
}

/// Print the declared package metadata
fn show_metadata(orchestrator: &Orchestrator, args: MetadataArgs) -> Result<()> {
    let manifest = orchestrator
        .manifest()
        .context("Failed to read package metadata")?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        OutputFormat::Plain => {
            for (name, value) in manifest.fields() {
                println!("{}={}", name, value.unwrap_or_default());
            }
        }
        OutputFormat::Table => {
            let width = manifest
                .fields()
                .iter()
                .map(|(name, _)| name.len())
                .max()
                .unwrap_or(10);
            for (name, value) in manifest.fields() {
                let value = match value {
                    Some(v) => v.normal(),
                    None => "<unset>".dimmed(),
                };
                println!("{:width$}  {}", name.cyan(), value, width = width);
            }

            print_list("Requirements", &manifest.install_requires);
            print_list("Scripts", &manifest.scripts);
            print_list("Packages", &manifest.packages);
            println!();
            println!("{}:", "Data Files".cyan());
            for data in &manifest.data_files {
                println!("  {}", data.destination.display());
                for file in &data.files {
                    println!("    - {}", file);
                }
            }
            print_list("Classifiers", &manifest.classifiers);
        }
    }

    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    println!();
    println!("{}:", title.cyan());
    if items.is_empty() {
        println!("  None");
    }
    for item in items {
        println!("  - {}", item);
    }
}

/// List registered setup commands
fn list_commands(orchestrator: &Orchestrator, args: ListArgs) -> Result<()> {
    let table = orchestrator.commands();

    match args.format {
        OutputFormat::Json => {
            let commands: Vec<_> = table
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "name": c.name(),
                        "description": c.description(),
                        "policy": c.policy(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&commands)?);
        }
        OutputFormat::Plain => {
            for name in table.names() {
                println!("{}", name);
            }
        }
        OutputFormat::Table => {
            let width = table.names().iter().map(|n| n.len()).max().unwrap_or(10);
            for command in table.iter() {
                println!(
                    "  {:width$}  {} ({})",
                    command.name().green(),
                    command.description(),
                    command.policy(),
                    width = width
                );
            }
        }
    }

    Ok(())
}
