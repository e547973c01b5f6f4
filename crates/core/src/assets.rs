//! The top-level context: publisher signature, named collections, tag renderer.

use crate::collection::{Collection, ComponentsDirectory, LocalComponents};
use crate::error::{PkgLinkError, Result};
use crate::render::TagRenderer;
use crate::url::AssetUrl;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_SIGNATURE: &str = "pkglink";

/// Built once at startup, then shared (typically as `Arc<Assets>`) with the
/// publisher and injector.
pub struct Assets {
    signature: Arc<str>,
    /// Collection name -> collection
    collections: HashMap<String, Arc<dyn Collection>>,
    renderer: TagRenderer,
}

impl Assets {
    pub fn new() -> Self {
        Self::with_signature(DEFAULT_SIGNATURE)
    }

    pub fn with_signature(signature: &str) -> Self {
        Self {
            signature: Arc::from(signature),
            collections: HashMap::new(),
            renderer: TagRenderer::default(),
        }
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Register the components directory at `path` under `name`.
    pub fn components(&mut self, name: &str, path: &Path) -> Result<Arc<ComponentsDirectory>> {
        self.ensure_unused(name)?;
        let directory = Arc::new(ComponentsDirectory::new(self.signature.clone(), name, path)?);
        self.collections
            .insert(name.to_string(), directory.clone() as Arc<dyn Collection>);
        Ok(directory)
    }

    /// Register a local collection layered over `parent` under `name`.
    pub fn local_components(
        &mut self,
        name: &str,
        parent: Arc<dyn Collection>,
    ) -> Result<Arc<LocalComponents>> {
        self.ensure_unused(name)?;
        let local = Arc::new(LocalComponents::new(self.signature.clone(), name, parent));
        self.collections
            .insert(name.to_string(), local.clone() as Arc<dyn Collection>);
        Ok(local)
    }

    fn ensure_unused(&self, name: &str) -> Result<()> {
        if self.collections.contains_key(name) {
            return Err(PkgLinkError::DuplicateCollection(name.to_string()));
        }
        Ok(())
    }

    pub fn collection(&self, name: &str) -> Option<Arc<dyn Collection>> {
        self.collections.get(name).cloned()
    }

    pub fn collections(&self) -> impl Iterator<Item = &Arc<dyn Collection>> {
        self.collections.values()
    }

    /// Registered collection names, sorted.
    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// File behind an asset URL, or `None` for a foreign signature, an
    /// unknown collection, or any resolution miss.
    pub fn resolve(&self, url: &AssetUrl) -> Option<PathBuf> {
        if url.signature != *self.signature {
            return None;
        }
        self.collections
            .get(&url.collection)?
            .resolve_file(&url.package, &url.version, &url.file_path)
    }

    pub fn renderer(&self) -> &TagRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut TagRenderer {
        &mut self.renderer
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::new()
    }
}
