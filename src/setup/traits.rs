//! Common traits and types for setup commands
//!
//! Defines the interface every command registered with the orchestrator
//! implements, and the shared execution context it runs with.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::environment::EnvironmentRoot;
use crate::error::{Stage, TaskError};
use crate::executor::{ExecOptions, Executor};

/// Result type for command operations
pub type CommandResult<T> = Result<T, TaskError>;

/// How a command treats failing steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandPolicy {
    /// Failures are logged and swallowed
    Tolerant,
    /// The first failure aborts with the failing tool's exit code
    Strict,
}

impl fmt::Display for CommandPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandPolicy::Tolerant => write!(f, "tolerant"),
            CommandPolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Read-only state shared by every command for one invocation
pub struct CommandContext<'a> {
    pub config: &'a Config,
    pub root: &'a EnvironmentRoot,
    /// Directory the source paths are resolved against
    pub project_dir: &'a Path,
    pub executor: &'a dyn Executor,
}

impl<'a> CommandContext<'a> {
    /// Options for an external tool: project dir and configured timeout
    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions::in_dir(self.project_dir).with_timeout_opt(self.config.toolchain.timeout())
    }

    /// Run one external step under `policy`
    pub fn invoke(&self, policy: CommandPolicy, stage: Stage, command: &str) -> CommandResult<()> {
        let result = self.executor.run_shell(command, &self.exec_options());

        match (policy, result) {
            (_, Ok(res)) if res.success => Ok(()),
            (CommandPolicy::Strict, Ok(res)) => Err(res.into_failure(stage, command)),
            (CommandPolicy::Strict, Err(e)) => Err(e),
            (CommandPolicy::Tolerant, Ok(res)) => {
                tracing::warn!(
                    "{} step exited with {:?}, ignoring: {}",
                    stage,
                    res.exit_code,
                    command
                );
                Ok(())
            }
            (CommandPolicy::Tolerant, Err(e)) => {
                tracing::warn!("{} step failed, ignoring: {}", stage, e);
                Ok(())
            }
        }
    }
}

/// A named unit of work the orchestrator dispatches to
///
/// The orchestrator calls `initialize_options`, `finalize_options` and `run`
/// in that order and never looks past this trait.
pub trait SetupCommand {
    /// Name the command is registered under (e.g., "lint")
    fn name(&self) -> &'static str;

    /// One-line description for command listings
    fn description(&self) -> &'static str;

    /// Failure policy of this command's steps
    fn policy(&self) -> CommandPolicy;

    /// Set option defaults. Must not fail.
    fn initialize_options(&mut self) {}

    /// Post-process options. Must not fail.
    fn finalize_options(&mut self) {}

    /// Perform the command
    ///
    /// # Errors
    /// * `TaskError::ToolFailed` - A strict step exited non-zero
    /// * `TaskError::SpawnFailed` - The shell could not be started
    /// * `TaskError::ProvisionFailed` - Filesystem setup failed
    fn run(&self, ctx: &CommandContext<'_>) -> CommandResult<()>;
}
