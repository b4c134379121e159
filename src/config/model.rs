//! Configuration model for kytos-setup
//!
//! Defines the structure for XDG-compliant layered configuration. Defaults
//! describe the Kytos source tree, so a checkout works without any file.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use std::time::Duration;

use crate::error::TaskError;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Static package description and install-time file lists
    #[serde(default)]
    pub project: ProjectConfig,

    /// Installation root selection
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Static analysis tool
    #[serde(default)]
    pub lint: LintConfig,

    /// Documentation toolchain
    #[serde(default)]
    pub docs: DocsConfig,

    /// Build artifacts removed by `clean`
    #[serde(default)]
    pub clean: CleanConfig,

    /// External build toolchain the custom commands extend
    #[serde(default)]
    pub toolchain: ToolchainConfig,
}

impl Config {
    /// Check cross-field constraints serde cannot express
    ///
    /// # Errors
    /// * `TaskError::Config` - A config file lies outside `etc/<namespace>/`
    pub fn validate(&self) -> Result<(), TaskError> {
        self.project.validate()
    }
}

/// Package description and install-time file placement
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// Distribution name, used when the metadata file declares no `__name__`
    #[serde(default = "default_name")]
    pub name: String,

    /// Directory under `<root>/etc/` holding the installed config files
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// File holding the `__name__ = 'value'` declarations, read as text
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,

    /// One requirement specifier per line
    #[serde(default = "default_requirements_file")]
    pub requirements_file: String,

    /// Scripts installed onto PATH
    #[serde(default = "default_scripts")]
    pub scripts: Vec<String>,

    /// Package directories left out of discovery
    #[serde(default = "default_exclude_packages")]
    pub exclude_packages: Vec<String>,

    /// Config and logging files linked by `develop`, relative to both the
    /// project root and the environment root
    #[serde(default = "default_config_files")]
    pub config_files: Vec<String>,

    /// Runtime directories created under the environment root by `develop`
    #[serde(default = "default_state_dirs")]
    pub state_dirs: Vec<String>,

    #[serde(default = "default_dependency_links")]
    pub dependency_links: Vec<String>,

    #[serde(default = "default_classifiers")]
    pub classifiers: Vec<String>,
}

fn default_name() -> String {
    "kytos".to_string()
}

fn default_namespace() -> String {
    "kytos".to_string()
}

fn default_metadata_file() -> String {
    "kytos/core/metadata.py".to_string()
}

fn default_requirements_file() -> String {
    "requirements.txt".to_string()
}

fn default_scripts() -> Vec<String> {
    vec!["bin/kytosd".to_string()]
}

fn default_exclude_packages() -> Vec<String> {
    vec!["tests".to_string()]
}

fn default_config_files() -> Vec<String> {
    vec![
        "etc/kytos/kytos.conf".to_string(),
        "etc/kytos/logging.ini".to_string(),
    ]
}

fn default_state_dirs() -> Vec<String> {
    vec!["var/lib/kytos/napps/.installed".to_string()]
}

fn default_dependency_links() -> Vec<String> {
    vec![
        "https://github.com/cemsbr/python-daemon/tarball/latest_release#egg=python-daemon-2.1.2"
            .to_string(),
    ]
}

fn default_classifiers() -> Vec<String> {
    [
        "License :: OSI Approved :: MIT License",
        "Operating System :: POSIX :: Linux",
        "Programming Language :: Python :: 3.6",
        "Topic :: System :: Networking",
        "Development Status :: 4 - Beta",
        "Environment :: Console",
        "Environment :: No Input/Output (Daemon)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            namespace: default_namespace(),
            metadata_file: default_metadata_file(),
            requirements_file: default_requirements_file(),
            scripts: default_scripts(),
            exclude_packages: default_exclude_packages(),
            config_files: default_config_files(),
            state_dirs: default_state_dirs(),
            dependency_links: default_dependency_links(),
            classifiers: default_classifiers(),
        }
    }
}

impl ProjectConfig {
    /// Directory config files are installed into, relative to the root
    pub fn etc_dir(&self) -> String {
        format!("etc/{}", self.namespace)
    }

    /// `develop` links `config_files` where the manifest installs them, so
    /// every entry must be a file below `etc_dir()`
    pub fn validate(&self) -> Result<(), TaskError> {
        let etc_dir = self.etc_dir();
        for file in &self.config_files {
            let path = Path::new(file);
            let inside = path.starts_with(&etc_dir)
                && path != Path::new(&etc_dir)
                && path.components().all(|c| matches!(c, Component::Normal(_)));
            if !inside {
                return Err(TaskError::Config(format!(
                    "config file '{}' is not under '{}/' (project.namespace = \"{}\")",
                    file, etc_dir, self.namespace
                )));
            }
        }
        Ok(())
    }
}

/// Installation root selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnvironmentConfig {
    /// Variable naming an isolated environment; `/` is used when unset
    #[serde(default = "default_root_var")]
    pub root_var: String,
}

fn default_root_var() -> String {
    "VIRTUAL_ENV".to_string()
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            root_var: default_root_var(),
        }
    }
}

/// Static analysis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LintConfig {
    /// Linter executable
    #[serde(default = "default_lint_command")]
    pub command: String,

    /// Source roots handed to the linter
    #[serde(default = "default_lint_paths")]
    pub paths: Vec<String>,
}

fn default_lint_command() -> String {
    "pylama".to_string()
}

fn default_lint_paths() -> Vec<String> {
    vec![
        "setup.py".to_string(),
        "tests".to_string(),
        "kytos".to_string(),
    ]
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            command: default_lint_command(),
            paths: default_lint_paths(),
        }
    }
}

impl LintConfig {
    /// Full command line for the linter
    pub fn command_line(&self) -> String {
        if self.paths.is_empty() {
            self.command.clone()
        } else {
            format!("{} {}", self.command, self.paths.join(" "))
        }
    }
}

/// Documentation toolchain configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocsConfig {
    /// Documentation directory holding the Makefile
    #[serde(default = "default_docs_dir")]
    pub dir: String,

    /// Command to execute make
    #[serde(default = "default_make_command")]
    pub make_command: String,

    #[serde(default = "default_doctest_target")]
    pub doctest_target: String,

    #[serde(default = "default_clean_target")]
    pub clean_target: String,
}

fn default_docs_dir() -> String {
    "docs".to_string()
}

fn default_make_command() -> String {
    "make".to_string()
}

fn default_doctest_target() -> String {
    "doctest".to_string()
}

fn default_clean_target() -> String {
    "clean".to_string()
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            make_command: default_make_command(),
            doctest_target: default_doctest_target(),
            clean_target: default_clean_target(),
        }
    }
}

impl DocsConfig {
    /// `make <target> -C <dir>`
    pub fn target_command(&self, target: &str) -> String {
        format!("{} {} -C {}", self.make_command, target, self.dir)
    }

    pub fn doctest_command(&self) -> String {
        self.target_command(&self.doctest_target)
    }

    pub fn clean_command(&self) -> String {
        self.target_command(&self.clean_target)
    }
}

/// Artifact cleanup configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanConfig {
    /// Paths or shell globs relative to the project root
    #[serde(default = "default_clean_paths")]
    pub paths: Vec<String>,
}

fn default_clean_paths() -> Vec<String> {
    vec![
        "build".to_string(),
        "dist".to_string(),
        "*.pyc".to_string(),
        "*.egg-info".to_string(),
    ]
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            paths: default_clean_paths(),
        }
    }
}

impl CleanConfig {
    /// `rm -vrf ./build ./dist ...`, left unquoted so globs expand
    pub fn remove_command(&self) -> String {
        let targets: Vec<String> = self.paths.iter().map(|p| format!("./{}", p)).collect();
        format!("rm -vrf {}", targets.join(" "))
    }
}

/// External build toolchain configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolchainConfig {
    /// Standard test action that `test` extends
    #[serde(default = "default_test_command")]
    pub test_command: String,

    /// Standard editable-install action that `develop` extends
    #[serde(default = "default_develop_command")]
    pub develop_command: String,

    /// Timeout in seconds for every external command (0 = none)
    #[serde(default)]
    pub timeout: u64,
}

fn default_test_command() -> String {
    "python3 -m unittest discover -s tests".to_string()
}

fn default_develop_command() -> String {
    "python3 -m pip install --no-deps --editable .".to_string()
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            test_command: default_test_command(),
            develop_command: default_develop_command(),
            timeout: 0,
        }
    }
}

impl ToolchainConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.project.name, "kytos");
        assert_eq!(config.project.metadata_file, "kytos/core/metadata.py");
        assert_eq!(
            config.project.config_files,
            vec!["etc/kytos/kytos.conf", "etc/kytos/logging.ini"]
        );
        assert_eq!(config.environment.root_var, "VIRTUAL_ENV");
        assert_eq!(config.toolchain.timeout, 0);
    }

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
            [lint]
            command = "flake8"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.lint.command, "flake8");
        // Missing sections and fields fall back to defaults
        assert_eq!(config.lint.paths, vec!["setup.py", "tests", "kytos"]);
        assert_eq!(config.docs.dir, "docs");
        assert_eq!(config.project.namespace, "kytos");
    }

    #[test]
    fn test_deserialize_full_project() {
        let toml = r#"
            [project]
            name = "ns"
            namespace = "ns"
            metadata_file = "ns/meta.py"
            config_files = ["etc/ns/a.conf", "etc/ns/b.ini"]
            state_dirs = []

            [environment]
            root_var = "MY_ROOT"

            [toolchain]
            test_command = "pytest"
            timeout = 120
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.project.etc_dir(), "etc/ns");
        assert_eq!(config.project.config_files.len(), 2);
        assert!(config.project.state_dirs.is_empty());
        assert_eq!(config.environment.root_var, "MY_ROOT");
        assert_eq!(config.toolchain.test_command, "pytest");
        assert_eq!(config.toolchain.timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_namespace_mismatch() {
        let mut config = Config::default();
        config.project.namespace = "ns".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, TaskError::Config(_)));
        assert!(err.to_string().contains("etc/kytos/kytos.conf"));
        assert!(err.to_string().contains("etc/ns/"));
    }

    #[test]
    fn test_validate_rejects_escaping_paths() {
        let mut project = ProjectConfig::default();
        for bad in ["etc/kytos", "etc/kytosd/kytos.conf", "etc/kytos/../x.conf", "/etc/kytos/a"] {
            project.config_files = vec![bad.to_string()];
            assert!(project.validate().is_err(), "{} should be rejected", bad);
        }

        project.config_files = vec!["etc/kytos/sub/a.conf".to_string()];
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_lint_command_line() {
        let lint = LintConfig::default();
        assert_eq!(lint.command_line(), "pylama setup.py tests kytos");

        let bare = LintConfig {
            command: "pylama".to_string(),
            paths: vec![],
        };
        assert_eq!(bare.command_line(), "pylama");
    }

    #[test]
    fn test_docs_commands() {
        let docs = DocsConfig::default();
        assert_eq!(docs.doctest_command(), "make doctest -C docs");
        assert_eq!(docs.clean_command(), "make clean -C docs");
    }

    #[test]
    fn test_clean_remove_command() {
        let clean = CleanConfig::default();
        assert_eq!(
            clean.remove_command(),
            "rm -vrf ./build ./dist ./*.pyc ./*.egg-info"
        );
    }

    #[test]
    fn test_zero_timeout_is_none() {
        assert_eq!(ToolchainConfig::default().timeout(), None);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"root_var\":\"VIRTUAL_ENV\""));
        assert!(json.contains("pylama"));
    }
}
