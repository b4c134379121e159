//! Metadata extraction from a declaration file read as plain text
//!
//! The declaration file lives inside the package it describes. Importing it
//! would initialise the whole package, which needs dependencies that are not
//! installed yet at setup time, so it is only ever scanned for
//! `__name__ = 'value'` lines.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TaskError;

/// Matches `__name__ = 'value'`: lowercase name, single-quoted value, no escapes
static DUNDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__([a-z]+(?:_[a-z]+)*)__\s*=\s*'([^']+)'").unwrap());

/// Constant names read from the declaration file, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    /// Scan `text` for every declaration; later duplicates overwrite earlier ones
    ///
    /// Never fails: anything that does not match is ignored.
    pub fn extract(text: &str) -> Self {
        let mut metadata = Metadata::default();
        for caps in DUNDER_RE.captures_iter(text) {
            metadata.insert(&caps[1], &caps[2]);
        }
        metadata
    }

    /// Read `path` as text and extract from it
    pub fn from_file(path: &Path) -> Result<Self, TaskError> {
        let text = fs::read_to_string(path)?;
        let metadata = Self::extract(&text);
        tracing::debug!(
            "Extracted {} metadata field(s) from {}",
            metadata.len(),
            path.display()
        );
        Ok(metadata)
    }

    fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    /// Value declared as `__<name>__`; `None` means not set
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const KYTOS_METADATA: &str = r#"
"""Holds main metadata information about the project."""

__version__ = '2017.1b1'
__author__ = 'Kytos Team'
__author_email__ = 'devel@lists.kytos.io'
__license__ = 'MIT'
__copyright__ = '2017, Kytos Team'
__url__ = 'http://github.com/kytos/kytos'
__description__ = 'Kytos SDN Platform.'
"#;

    #[test]
    fn test_extract_all_declarations() {
        let metadata = Metadata::extract(KYTOS_METADATA);

        assert_eq!(metadata.len(), 7);
        assert_eq!(metadata.get("version"), Some("2017.1b1"));
        assert_eq!(metadata.get("author"), Some("Kytos Team"));
        assert_eq!(metadata.get("author_email"), Some("devel@lists.kytos.io"));
        assert_eq!(metadata.get("url"), Some("http://github.com/kytos/kytos"));
        assert_eq!(metadata.get("description"), Some("Kytos SDN Platform."));
    }

    #[test]
    fn test_extract_preserves_first_seen_order() {
        let metadata = Metadata::extract(KYTOS_METADATA);
        let names: Vec<&str> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(names[0], "version");
        assert_eq!(names[1], "author");
    }

    #[test]
    fn test_extract_last_write_wins() {
        let metadata = Metadata::extract("__version__ = '1.0'\n__version__ = '2.0'\n");

        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get("version"), Some("2.0"));
    }

    #[test]
    fn test_extract_missing_field_is_unset() {
        let metadata = Metadata::extract("__version__ = '1.0.0'\n__license__ = 'MIT'\n");

        assert_eq!(metadata.get("version"), Some("1.0.0"));
        assert_eq!(metadata.get("license"), Some("MIT"));
        assert_eq!(metadata.get("description"), None);
        assert_eq!(metadata.get("author_email"), None);
    }

    #[test]
    fn test_extract_ignores_non_matching_shapes() {
        let text = r#"
__version__ = "double-quoted"
__Author__ = 'Capitalised'
__count__ = 3
version = 'no dunders'
__empty__ = ''
"#;
        let metadata = Metadata::extract(text);
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_extract_flexible_spacing() {
        let metadata = Metadata::extract("__url__='http://x'\n__license__   =   'MIT'");
        assert_eq!(metadata.get("url"), Some("http://x"));
        assert_eq!(metadata.get("license"), Some("MIT"));
    }

    #[test]
    fn test_extract_never_executes_content() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("executed");
        let text = format!(
            "import os\nos.system('touch {}')\n__import__('os').system('touch {}')\n__version__ = '1.0'\n",
            marker.display(),
            marker.display()
        );

        let metadata = Metadata::extract(&text);

        assert_eq!(metadata.get("version"), Some("1.0"));
        assert!(!marker.exists());
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metadata.py");
        std::fs::write(&path, KYTOS_METADATA).unwrap();

        let metadata = Metadata::from_file(&path).unwrap();
        assert_eq!(metadata.get("license"), Some("MIT"));
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let result = Metadata::from_file(Path::new("/nonexistent/metadata.py"));
        assert!(matches!(result, Err(TaskError::Io(_))));
    }
}
