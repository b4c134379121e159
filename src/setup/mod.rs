//! Setup commands layered on the external build toolchain
//!
//! - `develop` - editable install plus config-file links
//! - `lint` - static analysis, fails with the linter's exit code
//! - `clean` - best-effort artifact and docs cleanup
//! - `test` - test suite, doctests, then lint

pub mod clean;
pub mod develop;
pub mod lint;
pub mod registry;
pub mod test_runner;
pub mod traits;

pub use clean::Cleaner;
pub use develop::{ensure_config_links, ensure_link, ensure_state_dirs, DevelopInstaller, ProvisionReport};
pub use lint::Linter;
pub use registry::CommandTable;
pub use test_runner::TestRunner;
pub use traits::*;
