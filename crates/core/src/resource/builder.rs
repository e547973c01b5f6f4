//! Resource creation over a locked per-collection cache.

use super::{Resource, ResourceRef};
use crate::error::{PkgLinkError, Result};
use crate::model::Package;
use crate::url::AssetUrl;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// What a collection exposes to resource creation.
pub(crate) trait Scope {
    fn scope_name(&self) -> &str;
    fn scope_signature(&self) -> &str;
    /// Package lookup, local overrides first.
    fn package(&self, name: &str) -> Option<Arc<Package>>;
    /// Resources visible from an enclosing collection.
    fn inherited(&self, path: &str) -> Option<Arc<Resource>>;
    /// Whether an existing resource may be used as a dependency here.
    fn accepts(&self, resource: &Resource) -> Result<()>;
}

/// Creates resources into `cache`. The caller holds the collection's cache
/// lock for the builder's whole lifetime, so each path is created once.
pub(crate) struct ResourceBuilder<'a> {
    scope: &'a dyn Scope,
    cache: &'a mut HashMap<String, Arc<Resource>>,
    /// Packages whose main resource is under construction (gray set)
    visiting: Vec<String>,
}

impl<'a> ResourceBuilder<'a> {
    pub(crate) fn new(scope: &'a dyn Scope, cache: &'a mut HashMap<String, Arc<Resource>>) -> Self {
        Self {
            scope,
            cache,
            visiting: Vec::new(),
        }
    }

    fn lookup(&self, path: &str) -> Option<Arc<Resource>> {
        self.cache
            .get(path)
            .cloned()
            .or_else(|| self.scope.inherited(path))
    }

    /// Memoized resource for `path` with explicit extra dependencies.
    ///
    /// An existing resource is returned as is; `dependencies` only apply on
    /// first creation.
    pub(crate) fn declare(
        &mut self,
        path: &str,
        dependencies: &[ResourceRef],
    ) -> Result<Arc<Resource>> {
        if let Some(existing) = self.lookup(path) {
            return Ok(existing);
        }

        let mut resolved = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            let resource = match dependency {
                ResourceRef::Path(dep_path) => self.declare(dep_path, &[])?,
                ResourceRef::Resource(resource) => {
                    self.scope.accepts(resource)?;
                    resource.clone()
                }
            };
            resolved.push(resource);
        }

        // A dependency path naming the resource itself just created it.
        if self.cache.contains_key(path) {
            return Err(PkgLinkError::DependencyCycle(format!("{path} -> {path}")));
        }

        self.insert(path, resolved)
    }

    /// Main resource of `package`, creating the main resources of all its
    /// dependencies first.
    pub(crate) fn main_resource(&mut self, package: &Package) -> Result<Arc<Resource>> {
        if let Some(existing) = self.lookup(package.name()) {
            return Ok(existing);
        }

        if let Some(start) = self.visiting.iter().position(|n| n == package.name()) {
            let mut chain = self.visiting[start..].to_vec();
            chain.push(package.name().to_string());
            return Err(PkgLinkError::DependencyCycle(chain.join(" -> ")));
        }

        self.visiting.push(package.name().to_string());
        let dependencies = self.main_dependencies(package);
        self.visiting.pop();

        self.insert(package.name(), dependencies?)
    }

    fn main_dependencies(&mut self, package: &Package) -> Result<Vec<Arc<Resource>>> {
        let mut dependencies = Vec::with_capacity(package.dependencies().len());
        for name in package.dependencies() {
            let dependency =
                self.scope
                    .package(name)
                    .ok_or_else(|| PkgLinkError::UnknownDependency {
                        package: package.name().to_string(),
                        dependency: name.clone(),
                    })?;
            dependencies.push(self.main_resource(&dependency)?);
        }
        Ok(dependencies)
    }

    fn insert(&mut self, path: &str, dependencies: Vec<Arc<Resource>>) -> Result<Arc<Resource>> {
        let (package_name, file_path) = match path.split_once('/') {
            Some((package_name, file_path)) if !file_path.is_empty() => {
                (package_name, Some(file_path))
            }
            Some((package_name, _)) => (package_name, None),
            None => (path, None),
        };

        let package =
            self.scope
                .package(package_name)
                .ok_or_else(|| PkgLinkError::UnknownPackage {
                    package: package_name.to_string(),
                    collection: self.scope.scope_name().to_string(),
                })?;
        let file_path = file_path.unwrap_or(package.main()).to_string();
        let url = AssetUrl::new(
            self.scope.scope_signature(),
            self.scope.scope_name(),
            package.name(),
            package.version(),
            &file_path,
        )
        .to_string();

        debug!(
            collection = self.scope.scope_name(),
            path,
            url = %url,
            dependencies = dependencies.len(),
            "created resource"
        );

        let resource = Arc::new(Resource {
            collection: self.scope.scope_name().to_string(),
            path: path.to_string(),
            package,
            file_path,
            dependencies,
            url,
        });
        self.cache.insert(path.to_string(), resource.clone());
        Ok(resource)
    }
}
