//! Configuration loader with XDG-compliant path resolution
//!
//! Loads configuration from multiple locations with layered priority:
//! 1. `/etc/kytos-setup/config.toml` (lowest priority)
//! 2. `~/.config/kytos-setup/config.toml`
//! 3. `~/.kytos-setup.toml`
//! 4. `<project>/.kytos-setup.toml` (highest priority)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Config;

/// Application name used for XDG directories
const APP_NAME: &str = "kytos-setup";

/// Prefix for environment overrides
const ENV_PREFIX: &str = "KYTOS_SETUP_";

/// Get XDG config search paths in priority order (lowest to highest)
pub fn config_paths(project_dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. System-wide config (lowest priority)
    paths.push(PathBuf::from(format!("/etc/{}/config.toml", APP_NAME)));

    // 2. XDG config home
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_NAME).join("config.toml"));
    }

    // 3. Home directory
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{}.toml", APP_NAME)));
    }

    // 4. Project root (highest priority)
    paths.push(project_dir.join(format!(".{}.toml", APP_NAME)));

    paths
}

/// Load configuration with XDG layering
///
/// Configurations are merged in priority order, with later files
/// overriding earlier ones. Environment variables with prefix
/// `KYTOS_SETUP_` override all file-based configuration.
///
/// # Arguments
/// * `override_path` - Optional path to a config file that takes highest priority
/// * `project_dir` - Project root searched for `.kytos-setup.toml`
///
/// # Errors
/// Unreadable or mistyped files, and `TaskError::Config` when the merged
/// values fail `Config::validate`
pub fn load_config(override_path: Option<&str>, project_dir: &Path) -> Result<Config> {
    let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

    for path in config_paths(project_dir) {
        if path.exists() {
            tracing::debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }
    }

    if let Some(path) = override_path {
        let path = PathBuf::from(path);
        if path.exists() {
            tracing::debug!("Loading override config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        } else {
            tracing::warn!("Override config not found: {}", path.display());
        }
    }

    // KYTOS_SETUP_LINT__COMMAND=flake8 maps to lint.command = "flake8"
    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract().context("Failed to load configuration")?;
    config.validate()?;
    Ok(config)
}
