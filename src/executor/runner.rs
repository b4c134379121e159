//! Blocking command execution on top of tokio's process support
//!
//! External tools write straight to the terminal. Only the exit status is
//! reported back, with an optional timeout and working directory.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{suggest_fix, Stage, TaskError};

/// Shell used to interpret configured command lines
pub const DEFAULT_SHELL: &str = "sh";

/// Options for command execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecOptions {
    /// Working directory for the command
    pub working_dir: Option<PathBuf>,
    /// Timeout duration (None = no timeout)
    pub timeout: Option<Duration>,
}

impl ExecOptions {
    /// Create options with a working directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set an optional timeout
    pub fn with_timeout_opt(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Result of command execution
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code if available (None when killed by a signal)
    pub exit_code: Option<i32>,
    pub duration: Duration,
}

impl ExecResult {
    /// A zero-exit result
    pub fn ok() -> Self {
        Self::exited(0)
    }

    pub fn exited(code: i32) -> Self {
        Self {
            success: code == 0,
            exit_code: Some(code),
            ..Default::default()
        }
    }

    /// Convert a failed run into the error for `stage`
    pub fn into_failure(self, stage: Stage, command: impl Into<String>) -> TaskError {
        let command = command.into();
        let suggestion = suggest_fix(&command, self.exit_code);
        TaskError::ToolFailed {
            stage,
            command,
            exit_code: self.exit_code,
            suggestion,
        }
    }
}

/// Runs configured command lines
///
/// The seam between the setup commands and the external toolchain.
#[cfg_attr(test, mockall::automock)]
pub trait Executor {
    /// Run `command` through the shell and wait for it to exit
    fn run_shell(&self, command: &str, options: &ExecOptions) -> Result<ExecResult, TaskError>;
}

/// Executor backed by real child processes
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for ShellExecutor {
    fn run_shell(&self, command: &str, options: &ExecOptions) -> Result<ExecResult, TaskError> {
        exec_command_sync(DEFAULT_SHELL, &["-c", command], options)
    }
}

/// Execute a command asynchronously with timeout support
///
/// The child inherits stdin, stdout and stderr.
///
/// # Errors
/// * `TaskError::SpawnFailed` - If the command couldn't be spawned
/// * `TaskError::Timeout` - If the command timed out (when timeout is set)
pub async fn exec_command(
    program: &str,
    args: &[&str],
    options: &ExecOptions,
) -> Result<ExecResult, TaskError> {
    let start = Instant::now();
    let command_str = format!("{} {}", program, args.join(" "));

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    if let Some(ref dir) = options.working_dir {
        cmd.current_dir(dir);
    }

    tracing::debug!("Executing: {}", command_str);

    let mut child = cmd.spawn().map_err(|e| TaskError::SpawnFailed {
        command: command_str.clone(),
        error: e.to_string(),
    })?;

    let status = match options.timeout {
        Some(limit) => match timeout(limit, child.wait()).await {
            Ok(status) => status?,
            // Dropping the child kills it
            Err(_) => {
                return Err(TaskError::Timeout {
                    command: command_str,
                    timeout_secs: limit.as_secs(),
                });
            }
        },
        None => child.wait().await?,
    };

    tracing::debug!("{} exited with {:?} after {:?}", program, status.code(), start.elapsed());

    Ok(ExecResult {
        success: status.success(),
        exit_code: status.code(),
        duration: start.elapsed(),
    })
}

/// Execute a command synchronously
///
/// Blocks the calling thread on a current-thread runtime until the child exits.
pub fn exec_command_sync(
    program: &str,
    args: &[&str],
    options: &ExecOptions,
) -> Result<ExecResult, TaskError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            TaskError::Io(std::io::Error::other(format!(
                "Failed to create runtime: {}",
                e
            )))
        })?;

    rt.block_on(exec_command(program, args, options))
}
