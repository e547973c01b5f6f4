//! Request-scoped inclusion of resources.
//!
//! A handler registers the resources it needs through an [`Includer`]; the
//! injector later asks the shared [`Inclusions`] for the full closure:
//! every included resource and all of its transitive dependencies, each
//! exactly once, dependencies first.

use crate::collection::Collection;
use crate::error::Result;
use crate::resource::{Resource, ResourceRef};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Resources included during one request. Cloning yields a handle to the
/// same set; it must not outlive or be shared beyond its request.
#[derive(Debug, Clone, Default)]
pub struct Inclusions {
    included: Arc<Mutex<Vec<Arc<Resource>>>>,
}

impl Inclusions {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<Resource>>> {
        self.included.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `resource`. Returns `false` if it was already included.
    pub fn add(&self, resource: Arc<Resource>) -> bool {
        let mut included = self.lock();
        if included.iter().any(|r| Resource::same(r, &resource)) {
            return false;
        }
        included.push(resource);
        true
    }

    /// Directly included resources, in inclusion order.
    pub fn roots(&self) -> Vec<Arc<Resource>> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The inclusion closure.
    pub fn closure(&self) -> Vec<Arc<Resource>> {
        closure(&self.roots())
    }
}

/// Depth-first post-order expansion of `roots`: each resource is emitted
/// once, after all of its dependencies.
pub fn closure(roots: &[Arc<Resource>]) -> Vec<Arc<Resource>> {
    let mut seen: HashSet<*const Resource> = HashSet::new();
    let mut ordered = Vec::new();
    for root in roots {
        visit(root, &mut seen, &mut ordered);
    }
    ordered
}

fn visit(
    resource: &Arc<Resource>,
    seen: &mut HashSet<*const Resource>,
    ordered: &mut Vec<Arc<Resource>>,
) {
    if !seen.insert(Arc::as_ptr(resource)) {
        return;
    }
    for dependency in resource.dependencies() {
        visit(dependency, seen, ordered);
    }
    ordered.push(resource.clone());
}

/// Includes resources of one collection into a request's [`Inclusions`].
pub struct Includer<'a> {
    collection: &'a dyn Collection,
    inclusions: &'a Inclusions,
}

impl<'a> Includer<'a> {
    pub fn new(collection: &'a dyn Collection, inclusions: &'a Inclusions) -> Self {
        Self {
            collection,
            inclusions,
        }
    }

    /// Include a path (resolved, and created if needed, in the collection)
    /// or an existing resource.
    pub fn include(&self, item: impl Into<ResourceRef>) -> Result<Arc<Resource>> {
        let resource = self.collection.to_resource(&item.into())?;
        self.inclusions.add(resource.clone());
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ComponentsDirectory;
    use crate::model::Package;
    use crate::registry::PackageRegistry;
    use std::path::PathBuf;

    fn directory(packages: Vec<(&str, Vec<&str>)>) -> ComponentsDirectory {
        let registry = PackageRegistry::from_packages(
            PathBuf::from("/c"),
            packages.into_iter().map(|(name, deps)| {
                Package::new(
                    PathBuf::from("/c").join(name),
                    name,
                    "1.0.0",
                    format!("{name}.js"),
                    deps.into_iter().map(str::to_string).collect(),
                )
            }),
        )
        .unwrap();
        ComponentsDirectory::with_registry(Arc::from("sig"), "components", registry).unwrap()
    }

    fn paths(resources: &[Arc<Resource>]) -> Vec<&str> {
        resources.iter().map(|r| r.path()).collect()
    }

    #[test]
    fn test_closure_dependency_first() {
        let components = directory(vec![("a", vec!["b"]), ("b", vec![])]);
        let inclusions = Inclusions::new();
        components.includer(&inclusions).include("a").unwrap();

        assert_eq!(paths(&inclusions.closure()), vec!["b", "a"]);
    }

    #[test]
    fn test_closure_dedupes_across_includes() {
        let components = directory(vec![
            ("app", vec!["left", "right"]),
            ("left", vec!["base"]),
            ("right", vec!["base"]),
            ("base", vec![]),
        ]);
        let inclusions = Inclusions::new();
        let includer = components.includer(&inclusions);
        includer.include("left").unwrap();
        includer.include("app").unwrap();
        includer.include("base").unwrap();
        includer.include("app").unwrap();

        assert_eq!(inclusions.len(), 3);
        assert_eq!(
            paths(&inclusions.closure()),
            vec!["base", "left", "right", "app"]
        );
    }

    #[test]
    fn test_include_sub_resource_with_dependencies() {
        let components = directory(vec![("jquery", vec![]), ("plugin", vec![])]);
        components
            .resource_with("plugin/extra.js", &["jquery".into()])
            .unwrap();

        let inclusions = Inclusions::new();
        components
            .includer(&inclusions)
            .include("plugin/extra.js")
            .unwrap();

        assert_eq!(paths(&inclusions.closure()), vec!["jquery", "plugin/extra.js"]);
    }

    #[test]
    fn test_include_foreign_resource_rejected() {
        let first = directory(vec![("a", vec![])]);
        let registry = PackageRegistry::from_packages(
            PathBuf::from("/d"),
            vec![Package::new(PathBuf::from("/d/a"), "a", "1.0.0", "a.js", vec![])],
        )
        .unwrap();
        let second =
            ComponentsDirectory::with_registry(Arc::from("sig"), "other", registry).unwrap();

        let foreign = second.resource("a").unwrap();
        let inclusions = Inclusions::new();
        assert!(first.includer(&inclusions).include(&foreign).is_err());
        assert!(inclusions.is_empty());
    }

    #[test]
    fn test_include_unknown_package() {
        let components = directory(vec![]);
        let inclusions = Inclusions::new();
        assert!(components.includer(&inclusions).include("nope").is_err());
    }
}
