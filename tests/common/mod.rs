//! Common test utilities for kytos-setup tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Name of the config file written into each test project
pub const CONFIG_FILE: &str = "setup-test.toml";

/// Creates a temporary project directory with the given config
pub fn create_project(config: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(dir.path().join(CONFIG_FILE), config).expect("Failed to write config");
    let path = dir.path().to_path_buf();
    (dir, path)
}

/// Writes `content` to `rel` under `dir`, creating parents
pub fn write_file(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// The binary, run inside `project` with its config and a fixed environment root
pub fn setup_cmd(project: &Path, root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kytos-setup").expect("binary not built");
    cmd.current_dir(project)
        .env("VIRTUAL_ENV", root)
        .env_remove("RUST_LOG")
        .arg("-c")
        .arg(project.join(CONFIG_FILE))
        .arg("-p")
        .arg(project);
    cmd
}

/// Sample metadata declaration file
pub const SAMPLE_METADATA: &str = r#""""Holds main metadata information about the project."""
import kytos.core  # would initialise the whole package if executed

__version__ = '1.0.0'
__license__ = 'MIT'
"#;

/// Config whose external tools are plain shell commands
pub const PASSING_TOOLS: &str = r#"
[project]
namespace = "ns"
config_files = ["etc/ns/a.conf", "etc/ns/b.ini"]
state_dirs = ["var/lib/ns/napps/.installed"]

[lint]
command = "touch lint-ran"
paths = []

[docs]
make_command = "touch doctest-ran; true"

[toolchain]
test_command = "touch suite-ran"
develop_command = "true"
"#;
