//! Command table mapping fixed names to setup commands

use super::clean::Cleaner;
use super::develop::DevelopInstaller;
use super::lint::Linter;
use super::test_runner::TestRunner;
use super::traits::{CommandContext, CommandResult, SetupCommand};
use crate::error::TaskError;

/// Registered commands, in registration order
pub struct CommandTable {
    commands: Vec<Box<dyn SetupCommand>>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl CommandTable {
    /// An empty table
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// `develop`, `lint`, `clean` and `test`
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register(Box::new(DevelopInstaller::new()));
        table.register(Box::new(Linter::new()));
        table.register(Box::new(Cleaner::new()));
        table.register(Box::new(TestRunner::new()));
        table
    }

    /// Add a command, replacing any registered under the same name
    pub fn register(&mut self, command: Box<dyn SetupCommand>) {
        match self.commands.iter().position(|c| c.name() == command.name()) {
            Some(index) => self.commands[index] = command,
            None => self.commands.push(command),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn SetupCommand> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn SetupCommand> {
        self.commands.iter().map(|c| c.as_ref())
    }

    /// Run the command registered under `name`
    ///
    /// # Errors
    /// * `TaskError::UnknownCommand` - Nothing is registered under `name`
    /// * Whatever the command's `run` returns
    pub fn dispatch(&mut self, name: &str, ctx: &CommandContext<'_>) -> CommandResult<()> {
        let available: Vec<String> = self.names().iter().map(|n| n.to_string()).collect();
        let command = self
            .commands
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| TaskError::UnknownCommand {
                name: name.to_string(),
                available,
            })?;

        tracing::debug!("Dispatching '{}' ({} policy)", name, command.policy());
        command.initialize_options();
        command.finalize_options();
        command.run(ctx)
    }
}
