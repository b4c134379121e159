//! Installation root resolution
//!
//! Everything installed outside the package itself (config files, runtime
//! directories) lands under an environment root: the active virtualenv when
//! one is set, the filesystem root otherwise.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Filesystem root used when no environment is active
pub const SYSTEM_ROOT: &str = "/";

/// Prefix for every destination path, resolved once per process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRoot(PathBuf);

impl EnvironmentRoot {
    /// Resolve from the process environment
    pub fn resolve(var: &str) -> Self {
        let root = Self::from_value(std::env::var_os(var));
        tracing::debug!("Environment root from ${}: {}", var, root);
        root
    }

    /// Use `value` verbatim when present and non-empty, `/` otherwise
    ///
    /// The value is not checked for being an existing directory.
    pub fn from_value(value: Option<OsString>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self(PathBuf::from(v)),
            _ => Self(PathBuf::from(SYSTEM_ROOT)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// `<root>/<relative>`
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.0.join(relative)
    }
}

impl fmt::Display for EnvironmentRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
