//! kytos-setup - Setup orchestrator for the Kytos controller
//!
//! Layers custom commands on top of the external Python build toolchain:
//! - **develop** - editable install, then config files linked into the environment
//! - **lint** - static analysis; a failure exits with the linter's code
//! - **clean** - best-effort removal of build artifacts and built docs
//! - **test** - test suite, then documentation examples, then lint
//!
//! ## Features
//!
//! - Package metadata read from `__name__ = 'value'` declarations without
//!   executing the declaring file
//! - Environment root taken from the active virtualenv, `/` otherwise
//! - Idempotent config-file provisioning that never overwrites
//! - XDG-compliant layered configuration

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod executor;
pub mod metadata;
pub mod orchestrator;
pub mod setup;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use environment::EnvironmentRoot;
pub use error::{Stage, TaskError};
pub use executor::{exec_command, exec_command_sync, ExecOptions, ExecResult, Executor, ShellExecutor};
pub use metadata::{Metadata, PackageManifest};
pub use orchestrator::Orchestrator;
pub use setup::{
    Cleaner, CommandContext, CommandPolicy, CommandTable, DevelopInstaller, Linter, SetupCommand,
    TestRunner,
};
