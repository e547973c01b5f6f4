use super::{Collection, ResourceCache, lock_cache};
use crate::error::{PkgLinkError, Result};
use crate::model::Package;
use crate::registry::PackageRegistry;
use crate::resource::builder::{ResourceBuilder, Scope};
use crate::resource::{Resource, ResourceRef};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// A collection backed by one installed components directory.
///
/// Main resources for every package are created on construction.
pub struct ComponentsDirectory {
    name: String,
    signature: Arc<str>,
    registry: PackageRegistry,
    resources: ResourceCache,
}

impl ComponentsDirectory {
    pub fn new(signature: Arc<str>, name: impl Into<String>, path: &Path) -> Result<Self> {
        let registry = PackageRegistry::load(path)?;
        Self::with_registry(signature, name, registry)
    }

    pub fn with_registry(
        signature: Arc<str>,
        name: impl Into<String>,
        registry: PackageRegistry,
    ) -> Result<Self> {
        let directory = Self {
            name: name.into(),
            signature,
            registry,
            resources: ResourceCache::default(),
        };
        directory.create_main_resources()?;
        Ok(directory)
    }

    fn create_main_resources(&self) -> Result<()> {
        let order = self.registry.dependency_order()?;
        let mut cache = lock_cache(&self.resources);
        let mut builder = ResourceBuilder::new(self, &mut cache);
        for name in &order {
            if let Some(package) = self.registry.get(name) {
                builder.main_resource(&package)?;
            }
        }
        info!(
            collection = %self.name,
            root = %self.registry.root().display(),
            packages = order.len(),
            "created main resources"
        );
        Ok(())
    }

    pub fn registry(&self) -> &PackageRegistry {
        &self.registry
    }

    pub fn path(&self) -> &Path {
        self.registry.root()
    }
}

impl Scope for ComponentsDirectory {
    fn scope_name(&self) -> &str {
        &self.name
    }

    fn scope_signature(&self) -> &str {
        &self.signature
    }

    fn package(&self, name: &str) -> Option<Arc<Package>> {
        self.registry.get(name)
    }

    fn inherited(&self, _path: &str) -> Option<Arc<Resource>> {
        None
    }

    fn accepts(&self, resource: &Resource) -> Result<()> {
        self.accept(resource)
    }
}

impl Collection for ComponentsDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> &str {
        &self.signature
    }

    fn get_package(&self, name: &str) -> Option<Arc<Package>> {
        self.registry.get(name)
    }

    fn get_resource(&self, path: &str) -> Option<Arc<Resource>> {
        lock_cache(&self.resources).get(path).cloned()
    }

    fn resource_with(&self, path: &str, dependencies: &[ResourceRef]) -> Result<Arc<Resource>> {
        let mut cache = lock_cache(&self.resources);
        let mut builder = ResourceBuilder::new(self, &mut cache);
        builder.declare(path, dependencies)
    }

    fn resolve_file(&self, package: &str, version: &str, file_path: &str) -> Option<PathBuf> {
        self.registry.resolve_file(package, version, file_path)
    }

    fn accept(&self, resource: &Resource) -> Result<()> {
        if resource.collection() != self.name {
            return Err(PkgLinkError::ForeignResource {
                path: resource.path().to_string(),
                collection: resource.collection().to_string(),
            });
        }
        Ok(())
    }
}
