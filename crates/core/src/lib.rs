//! Package-aware static asset linking.
//!
//! Installed front-end packages are exposed under version-qualified URLs,
//! and the resources a page needs are expanded into their dependency
//! closure so that the right tags can be injected, dependencies first.
//!
//! ```text
//! ┌───────────────────┐    ┌───────────────────┐    ┌───────────────────┐
//! │  PackageRegistry  │───▶│    Collection     │───▶│     Resource      │
//! │  (.bower.json)    │    │ (dir / local)     │    │ (memoized graph)  │
//! └───────────────────┘    └─────────┬─────────┘    └─────────┬─────────┘
//!                                    │                        │
//!                                    ▼                        ▼
//!                          ┌───────────────────┐    ┌───────────────────┐
//!                          │     AssetUrl      │    │    Inclusions     │
//!                          │ (encode / parse)  │    │ (request closure) │
//!                          └───────────────────┘    └───────────────────┘
//! ```

pub mod assets;
pub mod collection;
pub mod config;
pub mod error;
pub mod include;
pub mod logging;
pub mod model;
pub mod registry;
pub mod render;
pub mod resource;
pub mod url;
pub mod util;

pub use assets::{Assets, DEFAULT_SIGNATURE};
pub use collection::{Collection, ComponentsDirectory, LocalComponents};
pub use config::Config;
pub use error::{PkgLinkError, Result};
pub use include::{Includer, Inclusions};
pub use model::{Manifest, Package};
pub use registry::PackageRegistry;
pub use render::TagRenderer;
pub use resource::{Resource, ResourceRef};
pub use url::AssetUrl;
