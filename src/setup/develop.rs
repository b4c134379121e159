//! Developer-mode install
//!
//! Instead of copying the config files into the environment, a symlink is
//! created at each destination pointing back at the source tree, so edits in
//! the checkout take effect without reinstalling.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::traits::{CommandContext, CommandPolicy, CommandResult, SetupCommand};
use crate::environment::EnvironmentRoot;
use crate::error::{Stage, TaskError};

/// What one provisioning pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    /// Entries this pass created
    pub created: Vec<PathBuf>,
    /// Entries that already existed and were left alone
    pub existing: Vec<PathBuf>,
}

impl ProvisionReport {
    /// True when the pass touched nothing on disk
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }

    fn merge(&mut self, other: ProvisionReport) {
        self.created.extend(other.created);
        self.existing.extend(other.existing);
    }
}

/// Editable install followed by config-file links and state directories
#[derive(Debug, Default, Clone, Copy)]
pub struct DevelopInstaller;

impl DevelopInstaller {
    pub fn new() -> Self {
        Self
    }
}

impl SetupCommand for DevelopInstaller {
    fn name(&self) -> &'static str {
        "develop"
    }

    fn description(&self) -> &'static str {
        "install in development mode, linking config files to the source tree"
    }

    fn policy(&self) -> CommandPolicy {
        CommandPolicy::Strict
    }

    fn run(&self, ctx: &CommandContext<'_>) -> CommandResult<()> {
        ctx.invoke(
            self.policy(),
            Stage::EditableInstall,
            &ctx.config.toolchain.develop_command,
        )?;

        let project = &ctx.config.project;
        let mut report = ensure_config_links(ctx.project_dir, ctx.root, &project.config_files)?;
        report.merge(ensure_state_dirs(ctx.root, &project.state_dirs)?);

        for path in &report.created {
            tracing::info!("Created {}", path.display());
        }
        tracing::debug!(
            "Develop install under {}: {} created, {} already present",
            ctx.root,
            report.created.len(),
            report.existing.len()
        );
        Ok(())
    }
}

/// Make every file in `files` available under `root` as a link into `project_dir`
///
/// Safe to re-run after an interrupted pass: existing entries are skipped.
pub fn ensure_config_links(
    project_dir: &Path,
    root: &EnvironmentRoot,
    files: &[String],
) -> CommandResult<ProvisionReport> {
    let source_dir = std::path::absolute(project_dir)?;
    let mut report = ProvisionReport::default();

    for file in files {
        let source = source_dir.join(file);
        let destination = root.join(file);

        if let Some(parent) = destination.parent() {
            ensure_dir(parent)?;
        }

        if ensure_link(&source, &destination)? {
            report.created.push(destination);
        } else {
            report.existing.push(destination);
        }
    }

    Ok(report)
}

/// Create each directory in `dirs` under `root` if missing
pub fn ensure_state_dirs(root: &EnvironmentRoot, dirs: &[String]) -> CommandResult<ProvisionReport> {
    let mut report = ProvisionReport::default();
    for dir in dirs {
        let path = root.join(dir);
        if ensure_dir(&path)? {
            report.created.push(path);
        } else {
            report.existing.push(path);
        }
    }
    Ok(report)
}

/// Returns whether the directory had to be created
fn ensure_dir(path: &Path) -> CommandResult<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|source| TaskError::ProvisionFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Link `destination` to `source` unless something is already there
///
/// Any existing entry counts, including a dangling link, a regular file or a
/// link to another target; it is never overwritten. Returns whether a link
/// was created.
pub fn ensure_link(source: &Path, destination: &Path) -> CommandResult<bool> {
    match fs::symlink_metadata(destination) {
        Ok(meta) => {
            if !meta.file_type().is_symlink() {
                tracing::debug!("{} exists and is not a link, leaving it", destination.display());
            } else if fs::read_link(destination).ok().as_deref() != Some(source) {
                tracing::debug!(
                    "{} links elsewhere than {}, leaving it",
                    destination.display(),
                    source.display()
                );
            }
            return Ok(false);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(TaskError::ProvisionFailed {
                path: destination.to_path_buf(),
                source,
            })
        }
    }

    match symlink(source, destination) {
        Ok(()) => Ok(true),
        // Another invocation won the race
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(source) => Err(TaskError::ProvisionFailed {
            path: destination.to_path_buf(),
            source,
        }),
    }
}

#[cfg(unix)]
fn symlink(source: &Path, destination: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, destination)
}

#[cfg(windows)]
fn symlink(source: &Path, destination: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(source, destination)
}
