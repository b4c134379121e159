//! Package metadata module
//!
//! - `extract` - side-effect-free reading of `__name__ = 'value'` declarations
//! - `manifest` - the static metadata block built from them

pub mod extract;
pub mod manifest;

pub use extract::Metadata;
pub use manifest::{find_packages, parse_requirements, read_requirements, DataFiles, PackageManifest};
