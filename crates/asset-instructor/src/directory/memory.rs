use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use instruction::Asset;
use serde::Deserialize;

use super::{AssetDirectory, AssetLookup, DirectoryError};

/// Asset directory backed by a map, immutable once built.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAssetDirectory {
    assets: HashMap<String, Arc<Asset>>,
}

/// On-disk fixture shape: `[[assets]]` tables in TOML, or
/// `{"assets": [...]}` / a bare array in JSON.
#[derive(Deserialize)]
#[serde(untagged)]
enum Fixture {
    Wrapped { assets: Vec<Asset> },
    Bare(Vec<Asset>),
}

impl Fixture {
    fn into_assets(self) -> Vec<Asset> {
        match self {
            Self::Wrapped { assets } | Self::Bare(assets) => assets,
        }
    }
}

impl InMemoryAssetDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of assets, rejecting duplicate names.
    pub fn with_assets(assets: impl IntoIterator<Item = Asset>) -> Result<Self, DirectoryError> {
        let mut dir = Self::new();
        for asset in assets {
            dir.insert(asset)?;
        }
        Ok(dir)
    }

    pub fn insert(&mut self, asset: Asset) -> Result<(), DirectoryError> {
        if self.assets.contains_key(&asset.name) {
            return Err(DirectoryError::DuplicateAsset(asset.name));
        }
        self.assets.insert(asset.name.clone(), Arc::new(asset));
        Ok(())
    }

    /// Load a `.toml` or `.json` fixture file.
    pub fn from_file(path: &Path) -> Result<Self, DirectoryError> {
        let fixture_err = |reason: String| DirectoryError::Fixture {
            path: path.to_path_buf(),
            reason,
        };

        let raw = std::fs::read_to_string(path).map_err(|e| fixture_err(e.to_string()))?;

        let fixture: Fixture = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&raw).map_err(|e| fixture_err(e.to_string()))?,
            Some("json") => serde_json::from_str(&raw).map_err(|e| fixture_err(e.to_string()))?,
            other => {
                return Err(fixture_err(format!(
                    "unsupported extension {:?}, expected .toml or .json",
                    other.unwrap_or("")
                )))
            }
        };

        let dir = Self::with_assets(fixture.into_assets())?;
        tracing::debug!(path = %path.display(), count = dir.len(), "Loaded asset fixture");
        Ok(dir)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Asset>> {
        self.assets.get(name)
    }
}

#[async_trait]
impl AssetDirectory for InMemoryAssetDirectory {
    async fn lookup(&self, name: &str) -> Result<AssetLookup, DirectoryError> {
        Ok(self.assets.get(name).cloned().into())
    }
}
