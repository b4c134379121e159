//! Entry point wiring configuration, environment root and the command table

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::environment::EnvironmentRoot;
use crate::error::TaskError;
use crate::executor::{Executor, ShellExecutor};
use crate::metadata::PackageManifest;
use crate::setup::{CommandContext, CommandTable};

/// Owns everything one process invocation needs
///
/// The environment root is resolved once at construction and never changes.
pub struct Orchestrator {
    config: Config,
    root: EnvironmentRoot,
    project_dir: PathBuf,
    table: CommandTable,
    executor: Box<dyn Executor>,
}

impl Orchestrator {
    /// Resolve the root from the configured variable and run tools in a shell
    pub fn new(config: Config, project_dir: impl Into<PathBuf>) -> Self {
        let root = EnvironmentRoot::resolve(&config.environment.root_var);
        Self::with_parts(config, root, project_dir, Box::new(ShellExecutor::new()))
    }

    pub fn with_parts(
        config: Config,
        root: EnvironmentRoot,
        project_dir: impl Into<PathBuf>,
        executor: Box<dyn Executor>,
    ) -> Self {
        Self {
            config,
            root,
            project_dir: project_dir.into(),
            table: CommandTable::with_defaults(),
            executor,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> &EnvironmentRoot {
        &self.root
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn commands(&self) -> &CommandTable {
        &self.table
    }

    /// Dispatch to the command registered under `name`
    pub fn run(&mut self, name: &str) -> Result<(), TaskError> {
        let ctx = CommandContext {
            config: &self.config,
            root: &self.root,
            project_dir: &self.project_dir,
            executor: self.executor.as_ref(),
        };
        self.table.dispatch(name, &ctx)
    }

    /// Static metadata block for the package in the project directory
    pub fn manifest(&self) -> Result<PackageManifest, TaskError> {
        PackageManifest::load(&self.project_dir, &self.config.project, &self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ExecResult, MockExecutor};
    use std::ffi::OsString;
    use tempfile::TempDir;

    #[test]
    fn test_run_dispatches_by_name() {
        let mut executor = MockExecutor::new();
        executor
            .expect_run_shell()
            .withf(|command, options| {
                command == "pylama setup.py tests kytos"
                    && options.working_dir == Some(PathBuf::from("/src/kytos"))
            })
            .times(1)
            .returning(|_, _| Ok(ExecResult::ok()));

        let mut orchestrator = Orchestrator::with_parts(
            Config::default(),
            EnvironmentRoot::from_value(None),
            "/src/kytos",
            Box::new(executor),
        );

        orchestrator.run("lint").unwrap();
    }

    #[test]
    fn test_run_unknown_command() {
        let mut orchestrator = Orchestrator::with_parts(
            Config::default(),
            EnvironmentRoot::from_value(None),
            ".",
            Box::new(MockExecutor::new()),
        );

        let result = orchestrator.run("upload");
        assert!(matches!(result, Err(TaskError::UnknownCommand { .. })));
    }

    #[test]
    fn test_new_resolves_configured_variable() {
        std::env::set_var("KYTOS_SETUP_TEST_ORCH_ROOT", "/opt/env");
        let mut config = Config::default();
        config.environment.root_var = "KYTOS_SETUP_TEST_ORCH_ROOT".to_string();
        let orchestrator = Orchestrator::new(config, ".");
        std::env::remove_var("KYTOS_SETUP_TEST_ORCH_ROOT");

        assert_eq!(orchestrator.root().path(), Path::new("/opt/env"));
        assert_eq!(orchestrator.commands().names().len(), 4);
    }

    #[test]
    fn test_manifest_uses_project_dir_and_root() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("kytos/core")).unwrap();
        std::fs::write(dir.path().join("kytos/__init__.py"), "").unwrap();
        std::fs::write(
            dir.path().join("kytos/core/metadata.py"),
            "__version__ = '1.0.0'\n__license__ = 'MIT'\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("requirements.txt"), "tornado\n").unwrap();

        let orchestrator = Orchestrator::with_parts(
            Config::default(),
            EnvironmentRoot::from_value(Some(OsString::from("/venv"))),
            dir.path(),
            Box::new(MockExecutor::new()),
        );

        let manifest = orchestrator.manifest().unwrap();
        assert_eq!(manifest.version.as_deref(), Some("1.0.0"));
        assert_eq!(manifest.description, None);
        assert_eq!(manifest.packages, vec!["kytos"]);
        assert_eq!(
            manifest.data_files[0].destination,
            PathBuf::from("/venv/etc/kytos")
        );
    }
}
