//! Collections: named namespaces binding resource lookups to packages.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────┐
//! │   LocalComponents    │ parent │ ComponentsDirectory  │
//! │ (overrides + cache)  │───────▶│ (registry + cache)   │
//! └──────────────────────┘        └──────────┬───────────┘
//!                                            │
//!                                            ▼
//!                                 ┌──────────────────────┐
//!                                 │   PackageRegistry    │
//!                                 └──────────────────────┘
//! ```

pub mod directory;
pub mod local;

pub use directory::ComponentsDirectory;
pub use local::LocalComponents;

use crate::error::Result;
use crate::include::{Includer, Inclusions};
use crate::model::Package;
use crate::resource::{Resource, ResourceRef};
use crate::url::AssetUrl;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub trait Collection: Send + Sync {
    /// Collection name, the second URL segment.
    fn name(&self) -> &str;

    /// Publisher signature, the first URL segment.
    fn signature(&self) -> &str;

    /// Package lookup as seen by dependency resolution.
    fn get_package(&self, name: &str) -> Option<Arc<Package>>;

    /// An already created resource, if any.
    fn get_resource(&self, path: &str) -> Option<Arc<Resource>>;

    /// The memoized resource for `path`, created with `dependencies` if it
    /// does not exist yet.
    fn resource_with(&self, path: &str, dependencies: &[ResourceRef]) -> Result<Arc<Resource>>;

    /// Absolute path of a file served under this collection's URLs.
    fn resolve_file(&self, package: &str, version: &str, file_path: &str) -> Option<PathBuf>;

    /// Check that `resource` may be used through this collection.
    fn accept(&self, resource: &Resource) -> Result<()>;

    fn resource(&self, path: &str) -> Result<Arc<Resource>> {
        self.resource_with(path, &[])
    }

    fn to_resource(&self, item: &ResourceRef) -> Result<Arc<Resource>> {
        match item {
            ResourceRef::Path(path) => self.resource(path),
            ResourceRef::Resource(resource) => {
                self.accept(resource)?;
                Ok(resource.clone())
            }
        }
    }

    /// URL of a package's directory, `/<sig>/<collection>/<package>/<version>/`.
    fn package_url(&self, name: &str) -> Option<String> {
        let package = self.get_package(name)?;
        Some(AssetUrl::package_prefix(
            self.signature(),
            self.name(),
            package.name(),
            package.version(),
        ))
    }

    fn includer<'a>(&'a self, inclusions: &'a Inclusions) -> Includer<'a>
    where
        Self: Sized,
    {
        Includer::new(self, inclusions)
    }
}

impl<'c> dyn Collection + 'c {
    /// Includer for a collection only known as a trait object, such as the
    /// ones returned by [`crate::Assets::collection`].
    pub fn includer<'a>(&'a self, inclusions: &'a Inclusions) -> Includer<'a> {
        Includer::new(self, inclusions)
    }
}

pub(crate) type ResourceCache = Mutex<HashMap<String, Arc<Resource>>>;

pub(crate) fn lock_cache(cache: &ResourceCache) -> MutexGuard<'_, HashMap<String, Arc<Resource>>> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}
