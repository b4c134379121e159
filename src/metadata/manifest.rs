//! Declared package metadata handed to the external build toolchain
//!
//! Text fields come from the declaration file; everything else is static
//! configuration plus the requirements list and package discovery.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::extract::Metadata;
use crate::config::ProjectConfig;
use crate::environment::EnvironmentRoot;
use crate::error::TaskError;

/// Files installed into one destination directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataFiles {
    pub destination: PathBuf,
    pub files: Vec<String>,
}

/// Static metadata block of the package
///
/// Text fields are `None` when the declaration file does not set them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
    pub author_email: Option<String>,
    pub license: Option<String>,
    pub install_requires: Vec<String>,
    pub dependency_links: Vec<String>,
    pub scripts: Vec<String>,
    pub data_files: Vec<DataFiles>,
    pub packages: Vec<String>,
    pub classifiers: Vec<String>,
}

impl PackageManifest {
    /// Read the declaration file, requirements and packages under `project_dir`
    pub fn load(
        project_dir: &Path,
        project: &ProjectConfig,
        root: &EnvironmentRoot,
    ) -> Result<Self, TaskError> {
        let metadata = Metadata::from_file(&project_dir.join(&project.metadata_file))?;
        let requirements = read_requirements(&project_dir.join(&project.requirements_file))?;
        let packages = find_packages(project_dir, &project.exclude_packages)?;
        Ok(Self::assemble(&metadata, requirements, packages, project, root))
    }

    /// Combine already-gathered inputs
    pub fn assemble(
        metadata: &Metadata,
        install_requires: Vec<String>,
        packages: Vec<String>,
        project: &ProjectConfig,
        root: &EnvironmentRoot,
    ) -> Self {
        let field = |name: &str| metadata.get(name).map(str::to_string);

        Self {
            name: field("name").unwrap_or_else(|| project.name.clone()),
            version: field("version"),
            description: field("description"),
            url: field("url"),
            author: field("author"),
            author_email: field("author_email"),
            license: field("license"),
            install_requires,
            dependency_links: project.dependency_links.clone(),
            scripts: project.scripts.clone(),
            data_files: vec![DataFiles {
                destination: root.join(project.etc_dir()),
                files: project.config_files.clone(),
            }],
            packages,
            classifiers: project.classifiers.clone(),
        }
    }

    /// Text fields in declaration order, for display
    pub fn fields(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("name", Some(self.name.as_str())),
            ("version", self.version.as_deref()),
            ("description", self.description.as_deref()),
            ("url", self.url.as_deref()),
            ("author", self.author.as_deref()),
            ("author_email", self.author_email.as_deref()),
            ("license", self.license.as_deref()),
        ]
    }
}

/// One specifier per line, trimmed; blank lines and comments are skipped
pub fn parse_requirements(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn read_requirements(path: &Path) -> Result<Vec<String>, TaskError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_requirements(&text))
}

/// Dotted names of every directory holding an `__init__.py`
///
/// Only descends into packages. A name in `exclude` drops that package and
/// all of its subpackages. Results are sorted.
pub fn find_packages(project_dir: &Path, exclude: &[String]) -> Result<Vec<String>, TaskError> {
    let mut packages = Vec::new();
    collect_packages(project_dir, None, exclude, &mut packages)?;
    packages.sort();
    Ok(packages)
}

fn collect_packages(
    dir: &Path,
    prefix: Option<&str>,
    exclude: &[String],
    out: &mut Vec<String>,
) -> Result<(), TaskError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if name.contains('.') || name.contains('-') {
            continue;
        }
        let path = entry.path();
        if !path.join("__init__.py").is_file() {
            continue;
        }
        let dotted = match prefix {
            Some(p) => format!("{}.{}", p, name),
            None => name.to_string(),
        };
        if exclude.iter().any(|e| *e == dotted) {
            tracing::debug!("Excluding package tree: {}", dotted);
            continue;
        }
        collect_packages(&path, Some(&dotted), exclude, out)?;
        out.push(dotted);
    }
    Ok(())
}
