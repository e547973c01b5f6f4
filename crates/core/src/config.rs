//! Server configuration (`pkglink.json`).

use crate::assets::{Assets, DEFAULT_SIGNATURE};
use crate::error::{PkgLinkError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_signature")]
    pub signature: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
    #[serde(default)]
    pub locals: Vec<LocalConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionConfig {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalConfig {
    pub name: String,
    /// Name of a collection (or earlier local collection) to layer over
    pub parent: String,
    #[serde(default)]
    pub components: Vec<LocalComponentConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalComponentConfig {
    pub path: PathBuf,
    pub version: String,
}

fn default_signature() -> String {
    DEFAULT_SIGNATURE.to_string()
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            signature: default_signature(),
            bind: default_bind(),
            collections: Vec::new(),
            locals: Vec::new(),
        }
    }
}

impl Config {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }
}

impl Assets {
    /// Build the context described by `config`. Relative paths are taken
    /// relative to `base_dir`.
    pub fn from_config(config: &Config, base_dir: &Path) -> Result<Self> {
        if config.signature.is_empty() || config.signature.contains('/') {
            return Err(PkgLinkError::Config(format!(
                "invalid signature {:?}",
                config.signature
            )));
        }

        let mut assets = Assets::with_signature(&config.signature);

        for collection in &config.collections {
            assets.components(&collection.name, &base_dir.join(&collection.path))?;
        }

        for local in &config.locals {
            let parent = assets.collection(&local.parent).ok_or_else(|| {
                PkgLinkError::Config(format!(
                    "local collection {} refers to unknown parent {}",
                    local.name, local.parent
                ))
            })?;
            let components = assets.local_components(&local.name, parent)?;
            for component in &local.components {
                components.component(&base_dir.join(&component.path), &component.version)?;
            }
        }

        info!(
            signature = assets.signature(),
            collections = assets.collection_names().len(),
            "configured assets"
        );
        Ok(assets)
    }
}
