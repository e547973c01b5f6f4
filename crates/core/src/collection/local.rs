use super::{Collection, ResourceCache, lock_cache};
use crate::error::{PkgLinkError, Result};
use crate::model::Package;
use crate::resource::builder::{ResourceBuilder, Scope};
use crate::resource::{Resource, ResourceRef};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// A collection layered over a parent collection with locally declared
/// packages that shadow the parent's packages of the same name.
///
/// Resource lookup consults this collection's cache, then the parent's,
/// so resources already created in the parent are reused as is. Parent
/// resources of a shadowed package are not visible.
pub struct LocalComponents {
    name: String,
    signature: Arc<str>,
    parent: Arc<dyn Collection>,
    /// Local component name -> package
    overrides: RwLock<HashMap<String, Arc<Package>>>,
    resources: ResourceCache,
}

impl LocalComponents {
    pub fn new(signature: Arc<str>, name: impl Into<String>, parent: Arc<dyn Collection>) -> Self {
        Self {
            name: name.into(),
            signature,
            parent,
            overrides: RwLock::new(HashMap::new()),
            resources: ResourceCache::default(),
        }
    }

    pub fn parent(&self) -> &Arc<dyn Collection> {
        &self.parent
    }

    /// Declare the package at `path` (read from its `bower.json`), pinned to
    /// `version`, and create its main resource in this collection.
    ///
    /// Resources this collection already created for a package of the same
    /// name (and anything depending on them) are dropped, so later lookups
    /// rebuild them against the override.
    pub fn component(&self, path: &Path, version: &str) -> Result<Arc<Package>> {
        let package = Arc::new(Package::load_local(path, version)?);
        let mut cache = lock_cache(&self.resources);

        {
            let mut overrides = self.overrides.write().unwrap_or_else(PoisonError::into_inner);
            if overrides.contains_key(package.name()) {
                return Err(PkgLinkError::DuplicateLocalComponent {
                    collection: self.name.clone(),
                    name: package.name().to_string(),
                });
            }
            overrides.insert(package.name().to_string(), package.clone());
        }

        let evicted = evict_package(&mut cache, package.name());
        let created = {
            let mut builder = ResourceBuilder::new(self, &mut cache);
            builder.main_resource(&package)
        };
        if let Err(err) = created {
            cache.retain(|key, _| !evicted.iter().any(|(old, _)| old == key));
            cache.extend(evicted);
            self.overrides
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(package.name());
            return Err(err);
        }

        info!(
            collection = %self.name,
            package = package.name(),
            version = package.version(),
            path = %package.path().display(),
            evicted = evicted.len(),
            "registered local component"
        );
        Ok(package)
    }

    /// A parent resource, unless its package is shadowed here.
    fn inherit(&self, path: &str) -> Option<Arc<Resource>> {
        let resource = self.parent.get_resource(path)?;
        match self.local_package(resource.package().name()) {
            Some(local) if !Arc::ptr_eq(&local, resource.package()) => None,
            _ => Some(resource),
        }
    }

    /// Locally declared package, without falling back to the parent.
    pub fn local_package(&self, name: &str) -> Option<Arc<Package>> {
        self.overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}

impl Scope for LocalComponents {
    fn scope_name(&self) -> &str {
        &self.name
    }

    fn scope_signature(&self) -> &str {
        &self.signature
    }

    fn package(&self, name: &str) -> Option<Arc<Package>> {
        self.get_package(name)
    }

    fn inherited(&self, path: &str) -> Option<Arc<Resource>> {
        self.inherit(path)
    }

    fn accepts(&self, resource: &Resource) -> Result<()> {
        self.accept(resource)
    }
}

impl Collection for LocalComponents {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> &str {
        &self.signature
    }

    fn get_package(&self, name: &str) -> Option<Arc<Package>> {
        self.local_package(name)
            .or_else(|| self.parent.get_package(name))
    }

    fn get_resource(&self, path: &str) -> Option<Arc<Resource>> {
        let local = lock_cache(&self.resources).get(path).cloned();
        local.or_else(|| self.inherit(path))
    }

    fn resource_with(&self, path: &str, dependencies: &[ResourceRef]) -> Result<Arc<Resource>> {
        let mut cache = lock_cache(&self.resources);
        let mut builder = ResourceBuilder::new(self, &mut cache);
        builder.declare(path, dependencies)
    }

    fn resolve_file(&self, package: &str, version: &str, file_path: &str) -> Option<PathBuf> {
        match self.local_package(package) {
            Some(local) => local.resolve_file(version, file_path),
            None => self.parent.resolve_file(package, version, file_path),
        }
    }

    fn accept(&self, _resource: &Resource) -> Result<()> {
        Ok(())
    }
}

/// Remove cached resources of package `name` and, transitively, every cached
/// resource depending on a removed one.
fn evict_package(
    cache: &mut HashMap<String, Arc<Resource>>,
    name: &str,
) -> Vec<(String, Arc<Resource>)> {
    let mut evicted: Vec<(String, Arc<Resource>)> = Vec::new();
    loop {
        let stale: Vec<String> = cache
            .iter()
            .filter(|(_, resource)| {
                resource.package().name() == name
                    || resource.dependencies().iter().any(|dependency| {
                        evicted
                            .iter()
                            .any(|(_, removed)| Resource::same(dependency, removed))
                    })
            })
            .map(|(path, _)| path.clone())
            .collect();
        if stale.is_empty() {
            return evicted;
        }
        for path in stale {
            if let Some(resource) = cache.remove(&path) {
                evicted.push((path, resource));
            }
        }
    }
}
