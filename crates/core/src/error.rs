use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PkgLinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid manifest {}: {reason}", .path.display())]
    InvalidManifest { path: PathBuf, reason: String },
    #[error("Duplicate name for collection: {0}")]
    DuplicateCollection(String),
    #[error("Duplicate package {name} in components directory {}", .root.display())]
    DuplicatePackage { name: String, root: PathBuf },
    #[error("Duplicate name for local component {name} in collection {collection}")]
    DuplicateLocalComponent { collection: String, name: String },
    #[error("Package {package} not known in collection {collection}")]
    UnknownPackage { package: String, collection: String },
    #[error("Package {package} depends on {dependency}, which is not installed")]
    UnknownDependency { package: String, dependency: String },
    #[error("Circular dependency detected: {0}")]
    DependencyCycle(String),
    #[error("Resource {path} belongs to collection {collection}")]
    ForeignResource { path: String, collection: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PkgLinkError>;
