//! CLI module for kytos-setup
//!
//! Provides command-line interface with the following subcommands:
//! - `develop` - Developer-mode install with linked config files
//! - `lint` - Run the linter
//! - `clean` - Remove build artifacts
//! - `test` - Run tests, doctests and lint
//! - `metadata` - Show declared package metadata
//! - `commands` - List registered setup commands

pub mod commands;

pub use commands::{Cli, Commands};
