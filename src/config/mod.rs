//! Configuration module for kytos-setup
//!
//! Provides XDG-compliant layered configuration loading. Every value has a
//! default matching the Kytos source tree.

pub mod loader;
pub mod model;

pub use loader::{config_paths, load_config};
pub use model::*;
