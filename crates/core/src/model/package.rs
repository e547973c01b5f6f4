use super::manifest::{LOCAL_MANIFEST, Manifest};
use crate::error::{PkgLinkError, Result};
use crate::util::join_within;
use std::path::{Path, PathBuf};

/// An installed (or locally declared) package. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    name: String,
    version: String,
    main: String,
    dependencies: Vec<String>,
    path: PathBuf,
}

impl Package {
    pub fn new(
        path: PathBuf,
        name: impl Into<String>,
        version: impl Into<String>,
        main: impl Into<String>,
        dependencies: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            main: main.into(),
            dependencies,
            path,
        }
    }

    /// Load the package rooted at `path` from its `manifest_file`.
    pub fn load(path: &Path, manifest_file: &str) -> Result<Self> {
        let manifest_path = path.join(manifest_file);
        let manifest = Manifest::from_file(&manifest_path)?;
        let version = manifest
            .version
            .clone()
            .ok_or_else(|| PkgLinkError::InvalidManifest {
                path: manifest_path.clone(),
                reason: "missing version".to_string(),
            })?;
        Self::from_manifest(path, &manifest_path, manifest, version)
    }

    /// Load a locally declared component, pinned to `version` regardless of
    /// what its manifest says.
    pub fn load_local(path: &Path, version: &str) -> Result<Self> {
        let root = path.canonicalize()?;
        let manifest_path = root.join(LOCAL_MANIFEST);
        let manifest = Manifest::from_file(&manifest_path)?;
        Self::from_manifest(&root, &manifest_path, manifest, version.to_string())
    }

    fn from_manifest(
        path: &Path,
        manifest_path: &Path,
        manifest: Manifest,
        version: String,
    ) -> Result<Self> {
        let main = manifest
            .main
            .first()
            .map(str::to_string)
            .ok_or_else(|| PkgLinkError::InvalidManifest {
                path: manifest_path.to_path_buf(),
                reason: "main is an empty list".to_string(),
            })?;
        let dependencies = manifest.dependency_names();
        Ok(Self::new(
            path.to_path_buf(),
            manifest.name,
            version,
            main,
            dependencies,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn main(&self) -> &str {
        &self.main
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of `file_path` inside this package.
    ///
    /// `None` if `version` is not exactly the installed version or if the
    /// path escapes the package root.
    pub fn resolve_file(&self, version: &str, file_path: &str) -> Option<PathBuf> {
        if version != self.version {
            return None;
        }
        join_within(&self.path, file_path)
    }
}
