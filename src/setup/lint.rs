//! Static analysis over the build script, tests and package sources

use super::traits::{CommandContext, CommandPolicy, CommandResult, SetupCommand};
use crate::error::Stage;

/// Runs the configured linter; a non-zero exit aborts with the linter's code
#[derive(Debug, Default, Clone, Copy)]
pub struct Linter;

impl Linter {
    pub fn new() -> Self {
        Self
    }

    /// Lint the configured source roots
    ///
    /// Shared with `test`, which lints after doctests pass.
    pub fn lint(ctx: &CommandContext<'_>) -> CommandResult<()> {
        let lint = &ctx.config.lint;

        if !program_on_path(&lint.command) {
            tracing::warn!("'{}' was not found on PATH", lint.command);
        }

        tracing::info!("{} is running. It may take several seconds...", lint.command);
        ctx.invoke(CommandPolicy::Strict, Stage::Lint, &lint.command_line())
    }
}

/// Whether the program a command line starts with resolves on PATH
fn program_on_path(command: &str) -> bool {
    command
        .split_whitespace()
        .next()
        .is_some_and(|program| which::which(program).is_ok())
}

impl SetupCommand for Linter {
    fn name(&self) -> &'static str {
        "lint"
    }

    fn description(&self) -> &'static str {
        "run the linter on the build script, tests and package sources"
    }

    fn policy(&self) -> CommandPolicy {
        CommandPolicy::Strict
    }

    fn run(&self, ctx: &CommandContext<'_>) -> CommandResult<()> {
        Self::lint(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::environment::EnvironmentRoot;
    use crate::error::TaskError;
    use crate::executor::{ExecResult, MockExecutor};
    use std::path::Path;

    #[test]
    fn test_lint_runs_fixed_source_roots() {
        let config = Config::default();
        let root = EnvironmentRoot::from_value(None);
        let mut executor = MockExecutor::new();
        executor
            .expect_run_shell()
            .withf(|command, options| {
                command == "pylama setup.py tests kytos" && options.timeout.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(ExecResult::ok()));
        let ctx = CommandContext {
            config: &config,
            root: &root,
            project_dir: Path::new("."),
            executor: &executor,
        };

        assert!(Linter.run(&ctx).is_ok());
    }

    #[test]
    fn test_lint_failure_keeps_tool_exit_code() {
        let mut config = Config::default();
        config.lint.command = "flake8".to_string();
        config.lint.paths = vec!["src".to_string()];
        let root = EnvironmentRoot::from_value(None);
        let mut executor = MockExecutor::new();
        executor
            .expect_run_shell()
            .withf(|command, _| command == "flake8 src")
            .returning(|_, _| Ok(ExecResult::exited(3)));
        let ctx = CommandContext {
            config: &config,
            root: &root,
            project_dir: Path::new("."),
            executor: &executor,
        };

        let err = Linter.run(&ctx).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "FAILED: please, fix the error(s) above.");
        assert!(matches!(err, TaskError::ToolFailed { stage: Stage::Lint, .. }));
    }

    #[test]
    fn test_program_on_path_checks_first_word_only() {
        assert!(program_on_path("sh -c 'exit 0'"));
        assert!(program_on_path("  sh   -m pylama"));
        assert!(!program_on_path("nonexistent_linter_12345 kytos"));
        assert!(!program_on_path(""));
    }

    #[test]
    fn test_linter_identity() {
        assert_eq!(Linter::new().name(), "lint");
        assert_eq!(Linter.policy(), CommandPolicy::Strict);
    }
}
