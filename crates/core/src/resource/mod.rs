//! Addressable assets and their dependency graph.
//!
//! A [`Resource`] is one file inside one package, plus the resources it
//! depends on. Resources are memoized per collection and shared as
//! `Arc<Resource>`; two lookups of the same path in the same collection
//! yield the same allocation. The graph is acyclic by construction: a
//! resource can only depend on resources that already exist.

pub(crate) mod builder;

use crate::model::Package;
use crate::util;
use std::sync::Arc;

#[derive(Debug)]
pub struct Resource {
    collection: String,
    path: String,
    package: Arc<Package>,
    file_path: String,
    dependencies: Vec<Arc<Resource>>,
    url: String,
}

impl Resource {
    /// Name of the collection that created this resource.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Declared path: a bare package name or `package/sub/path`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn package(&self) -> &Arc<Package> {
        &self.package
    }

    /// File inside the package this resource points at.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn dependencies(&self) -> &[Arc<Resource>] {
        &self.dependencies
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn extension(&self) -> Option<String> {
        util::extension(&self.file_path)
    }

    /// Identity comparison; resources are singletons per collection and path.
    pub fn same(a: &Arc<Resource>, b: &Arc<Resource>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

/// Either a path to be resolved by a collection or an existing resource.
#[derive(Debug, Clone)]
pub enum ResourceRef {
    Path(String),
    Resource(Arc<Resource>),
}

impl From<&str> for ResourceRef {
    fn from(path: &str) -> Self {
        ResourceRef::Path(path.to_string())
    }
}

impl From<String> for ResourceRef {
    fn from(path: String) -> Self {
        ResourceRef::Path(path)
    }
}

impl From<Arc<Resource>> for ResourceRef {
    fn from(resource: Arc<Resource>) -> Self {
        ResourceRef::Resource(resource)
    }
}

impl From<&Arc<Resource>> for ResourceRef {
    fn from(resource: &Arc<Resource>) -> Self {
        ResourceRef::Resource(resource.clone())
    }
}
