//! Package descriptor (`.bower.json` / `bower.json`) ingestion.

use crate::error::{PkgLinkError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Manifest written by the installer into each installed package directory.
pub const INSTALLED_MANIFEST: &str = ".bower.json";

/// Manifest maintained by hand in a locally declared component.
pub const LOCAL_MANIFEST: &str = "bower.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub main: MainEntry,
    /// Dependency name -> version constraint. Only the names matter here.
    #[serde(default)]
    pub dependencies: Option<IndexMap<String, String>>,
}

/// `main` is either a single path or a list whose first element wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MainEntry {
    Single(String),
    Many(Vec<String>),
}

impl MainEntry {
    pub fn first(&self) -> Option<&str> {
        match self {
            MainEntry::Single(main) => Some(main),
            MainEntry::Many(mains) => mains.first().map(String::as_str),
        }
    }
}

impl Manifest {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content).map_err(|source| PkgLinkError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Names of declared dependencies, in manifest order.
    pub fn dependency_names(&self) -> Vec<String> {
        self.dependencies
            .as_ref()
            .map(|deps| deps.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_main() {
        let manifest = Manifest::from_str(
            r#"{"name": "jquery", "version": "2.1.1", "main": "dist/jquery.js"}"#,
        )
        .unwrap();
        assert_eq!(manifest.name, "jquery");
        assert_eq!(manifest.version.as_deref(), Some("2.1.1"));
        assert_eq!(manifest.main.first(), Some("dist/jquery.js"));
        assert!(manifest.dependency_names().is_empty());
    }

    #[test]
    fn test_parse_list_main_uses_first() {
        let manifest = Manifest::from_str(
            r#"{"name": "bootstrap", "version": "3.2.0",
                "main": ["dist/css/bootstrap.css", "dist/js/bootstrap.js"]}"#,
        )
        .unwrap();
        assert_eq!(manifest.main.first(), Some("dist/css/bootstrap.css"));
    }

    #[test]
    fn test_dependencies_keep_manifest_order() {
        let manifest = Manifest::from_str(
            r#"{"name": "app", "version": "1.0.0", "main": "app.js",
                "dependencies": {"zepto": "~1.0", "angular": ">=1.2", "moment": "*"}}"#,
        )
        .unwrap();
        assert_eq!(manifest.dependency_names(), vec!["zepto", "angular", "moment"]);
    }

    #[test]
    fn test_null_dependencies() {
        let manifest = Manifest::from_str(
            r#"{"name": "a", "version": "1.0.0", "main": "a.js", "dependencies": null}"#,
        )
        .unwrap();
        assert!(manifest.dependency_names().is_empty());
    }

    #[test]
    fn test_missing_main_is_error() {
        assert!(Manifest::from_str(r#"{"name": "a", "version": "1.0.0"}"#).is_err());
    }
}
