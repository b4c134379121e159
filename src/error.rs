//! Error types for kytos-setup
//!
//! Provides structured error types with suggestions for common issues.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Pipeline stage an external tool ran in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Static analysis over the source roots
    Lint,
    /// The external toolchain's test suite
    TestSuite,
    /// Documentation examples (`make doctest`)
    Doctest,
    /// The external toolchain's editable install
    EditableInstall,
    /// Artifact and docs cleanup
    Clean,
}

impl Stage {
    /// Fixed diagnostic printed when this stage fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Stage::Lint => "FAILED: please, fix the error(s) above.",
            Stage::TestSuite => "FAILED: the test suite reported failures.",
            Stage::Doctest => "FAILED: the documentation examples did not pass.",
            Stage::EditableInstall => "FAILED: the editable install did not complete.",
            Stage::Clean => "FAILED: cleanup did not complete.",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lint => write!(f, "lint"),
            Stage::TestSuite => write!(f, "test suite"),
            Stage::Doctest => write!(f, "doctest"),
            Stage::EditableInstall => write!(f, "editable install"),
            Stage::Clean => write!(f, "clean"),
        }
    }
}

/// Main error type for setup operations
#[derive(Error, Debug)]
pub enum TaskError {
    /// An external tool exited non-zero
    #[error("{}", .stage.failure_message())]
    ToolFailed {
        stage: Stage,
        command: String,
        exit_code: Option<i32>,
        suggestion: Option<String>,
    },

    /// Failed to spawn the command
    #[error("Failed to spawn command: {command}")]
    SpawnFailed { command: String, error: String },

    /// Command timed out
    #[error("Command timed out after {timeout_secs}s: {command}")]
    Timeout { command: String, timeout_secs: u64 },

    /// No command registered under the requested name
    #[error("Unknown command '{name}'")]
    UnknownCommand { name: String, available: Vec<String> },

    /// Creating a config link, its parent or a state directory failed
    #[error("Failed to create {}: {source}", .path.display())]
    ProvisionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaskError {
    /// Process exit code this error terminates with
    ///
    /// Tool failures carry the tool's own code through; a child killed by a
    /// signal, or a code that would truncate to zero, becomes 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            TaskError::ToolFailed {
                exit_code: Some(code),
                ..
            } => match u8::try_from(*code) {
                Ok(0) | Err(_) => 1,
                Ok(code) => code,
            },
            _ => 1,
        }
    }

    /// Suggestion attached to this error, if any
    pub fn suggestion(&self) -> Option<String> {
        match self {
            TaskError::ToolFailed { suggestion, .. } => suggestion.clone(),
            TaskError::SpawnFailed { error, .. } => {
                Some(format!("Check if the command exists: {}", error))
            }
            TaskError::Timeout { .. } => Some(
                "Try increasing [toolchain].timeout or checking if the command hangs".to_string(),
            ),
            TaskError::UnknownCommand { available, .. } => {
                Some(format!("Available commands: {}", available.join(", ")))
            }
            TaskError::ProvisionFailed { source, .. }
                if source.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                Some(
                    "Permission denied. Activate a virtualenv or run with appropriate access."
                        .to_string(),
                )
            }
            TaskError::Config(_) => {
                Some("Check your kytos-setup configuration file".to_string())
            }
            _ => None,
        }
    }
}

/// Suggest fixes for common tool failure patterns
///
/// Tool output goes straight to the terminal, so only the exit code is
/// available to go on.
pub fn suggest_fix(command: &str, exit_code: Option<i32>) -> Option<String> {
    let program = command.split_whitespace().next().unwrap_or(command);

    match exit_code {
        // sh reports a missing program with 127
        Some(127) => Some(match program {
            "pylama" => "'pylama' not found. Install it: pip install pylama".to_string(),
            "make" => "'make' not found. Install build-essential or make.".to_string(),
            _ => format!(
                "'{}' not found. Check PATH and the active environment.",
                program
            ),
        }),
        // ...and one it cannot execute with 126
        Some(126) => Some(format!(
            "'{}' is not executable. Check its file permissions.",
            program
        )),
        _ => None,
    }
}
