//! Installed package registry.
//!
//! One registry per components root. Each immediate subdirectory of the root
//! is a package described by its `.bower.json`. The registry is loaded once
//! and is read-only afterwards.

mod order;

use crate::error::{PkgLinkError, Result};
use crate::model::{INSTALLED_MANIFEST, Package};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct PackageRegistry {
    root: PathBuf,
    /// Package name -> package
    packages: HashMap<String, Arc<Package>>,
}

impl PackageRegistry {
    /// Scan `root` and load one package per subdirectory.
    ///
    /// Any malformed manifest fails the whole load.
    pub fn load(root: &Path) -> Result<Self> {
        let root = root.canonicalize()?;
        let mut packages = HashMap::new();

        for entry in WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let package = Package::load(path, INSTALLED_MANIFEST)?;
            debug!(package = package.name(), version = package.version(), "loaded package");
            if packages.contains_key(package.name()) {
                return Err(PkgLinkError::DuplicatePackage {
                    name: package.name().to_string(),
                    root,
                });
            }
            packages.insert(package.name().to_string(), Arc::new(package));
        }

        info!(root = %root.display(), packages = packages.len(), "loaded package registry");
        Ok(Self { root, packages })
    }

    /// Build a registry from already loaded packages.
    pub fn from_packages(
        root: PathBuf,
        packages: impl IntoIterator<Item = Package>,
    ) -> Result<Self> {
        let mut map = HashMap::new();
        for package in packages {
            if map.contains_key(package.name()) {
                return Err(PkgLinkError::DuplicatePackage {
                    name: package.name().to_string(),
                    root,
                });
            }
            map.insert(package.name().to_string(), Arc::new(package));
        }
        Ok(Self {
            root,
            packages: map,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, name: &str) -> Option<Arc<Package>> {
        self.packages.get(name).cloned()
    }

    /// Package names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.packages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Absolute path of a file in an installed package.
    ///
    /// `None` for an unknown package, a version other than the installed
    /// one, or a path that leaves the package root.
    pub fn resolve_file(&self, name: &str, version: &str, file_path: &str) -> Option<PathBuf> {
        self.packages.get(name)?.resolve_file(version, file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_package(root: &Path, dir: &str, manifest: &str) {
        let path = root.join(dir);
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join(INSTALLED_MANIFEST), manifest).unwrap();
    }

    #[test]
    fn test_load_skips_plain_files() {
        let dir = tempdir().unwrap();
        write_package(
            dir.path(),
            "jquery",
            r#"{"name": "jquery", "version": "2.1.1", "main": "dist/jquery.js"}"#,
        );
        fs::write(dir.path().join("README.md"), "not a package").unwrap();

        let registry = PackageRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("jquery").unwrap().version(), "2.1.1");
        assert!(registry.get("README.md").is_none());
    }

    #[test]
    fn test_load_fails_on_malformed_manifest() {
        let dir = tempdir().unwrap();
        write_package(
            dir.path(),
            "good",
            r#"{"name": "good", "version": "1.0.0", "main": "good.js"}"#,
        );
        write_package(dir.path(), "bad", "{ not json");

        let err = PackageRegistry::load(dir.path()).err().unwrap();
        assert!(matches!(err, PkgLinkError::Manifest { .. }));
    }

    #[test]
    fn test_load_rejects_duplicate_names() {
        let dir = tempdir().unwrap();
        let manifest = r#"{"name": "jquery", "version": "2.1.1", "main": "jquery.js"}"#;
        write_package(dir.path(), "jquery", manifest);
        write_package(dir.path(), "jquery-copy", manifest);

        let err = PackageRegistry::load(dir.path()).err().unwrap();
        assert!(matches!(err, PkgLinkError::DuplicatePackage { ref name, .. } if name == "jquery"));
    }

    #[test]
    fn test_resolve_file() {
        let dir = tempdir().unwrap();
        write_package(
            dir.path(),
            "jquery",
            r#"{"name": "jquery", "version": "2.1.1", "main": "dist/jquery.js"}"#,
        );
        let registry = PackageRegistry::load(dir.path()).unwrap();
        let root = registry.root().join("jquery");

        assert_eq!(
            registry.resolve_file("jquery", "2.1.1", "dist/jquery.js"),
            Some(root.join("dist/jquery.js"))
        );
        assert_eq!(registry.resolve_file("jquery", "2.1.2", "dist/jquery.js"), None);
        assert_eq!(registry.resolve_file("zepto", "2.1.1", "dist/jquery.js"), None);
        assert_eq!(registry.resolve_file("jquery", "2.1.1", "../jquery/../../x"), None);
    }
}
