//! Best-effort removal of build artifacts and built documentation

use super::traits::{CommandContext, CommandPolicy, CommandResult, SetupCommand};
use crate::error::Stage;

/// Removes build, dist, compiled and egg-info artifacts, then cleans the docs
///
/// Never fails: the artifacts may legitimately not exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cleaner;

impl Cleaner {
    pub fn new() -> Self {
        Self
    }
}

impl SetupCommand for Cleaner {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn description(&self) -> &'static str {
        "clean build, dist, pyc and egg from package and docs"
    }

    fn policy(&self) -> CommandPolicy {
        CommandPolicy::Tolerant
    }

    fn run(&self, ctx: &CommandContext<'_>) -> CommandResult<()> {
        let policy = self.policy();
        ctx.invoke(policy, Stage::Clean, &ctx.config.clean.remove_command())?;
        ctx.invoke(policy, Stage::Clean, &ctx.config.docs.clean_command())
    }
}
