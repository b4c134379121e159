//! Test pipeline: test suite, then documentation examples, then lint
//!
//! Each stage only runs when the previous one passed.

use super::lint::Linter;
use super::traits::{CommandContext, CommandPolicy, CommandResult, SetupCommand};
use crate::error::Stage;

/// Extends the toolchain's test action with doctests and linting
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner;

impl TestRunner {
    pub fn new() -> Self {
        Self
    }
}

impl SetupCommand for TestRunner {
    fn name(&self) -> &'static str {
        "test"
    }

    fn description(&self) -> &'static str {
        "run the test suite, documentation examples and linter"
    }

    fn policy(&self) -> CommandPolicy {
        CommandPolicy::Strict
    }

    fn run(&self, ctx: &CommandContext<'_>) -> CommandResult<()> {
        let policy = self.policy();

        ctx.invoke(policy, Stage::TestSuite, &ctx.config.toolchain.test_command)?;

        tracing::info!("Running examples in documentation");
        ctx.invoke(policy, Stage::Doctest, &ctx.config.docs.doctest_command())?;

        Linter::lint(ctx)
    }
}
