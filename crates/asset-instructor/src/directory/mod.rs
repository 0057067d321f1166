//! Asset Directory: resolves an asset name to its capability record.
//!
//! A missing asset is a normal outcome ([`AssetLookup::NotFound`]) that the
//! caller must branch on. [`DirectoryError`] is reserved for backend faults,
//! so "not found" and "could not ask" never get confused.
//!
//! | Backend                   | Use                                   |
//! |---------------------------|---------------------------------------|
//! | `PostgresAssetDirectory`  | production, `assets` table            |
//! | `InMemoryAssetDirectory`  | fixtures, tests, offline runs         |

mod memory;
mod postgres;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use instruction::Asset;
use thiserror::Error;

pub use memory::InMemoryAssetDirectory;
pub use postgres::PostgresAssetDirectory;

/// Result of resolving an asset name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLookup {
    Found(Arc<Asset>),
    NotFound,
}

impl From<Option<Arc<Asset>>> for AssetLookup {
    fn from(value: Option<Arc<Asset>>) -> Self {
        match value {
            Some(asset) => Self::Found(asset),
            None => Self::NotFound,
        }
    }
}

/// Backend failure while resolving or loading assets.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Asset database connection failed: {0}")]
    Connection(String),

    #[error("Asset query failed: {0}")]
    Query(String),

    /// A stored record cannot be represented as an [`Asset`].
    #[error("Asset record {name} is corrupt: {reason}")]
    CorruptRecord { name: String, reason: String },

    #[error("Failed to load asset fixture {}: {reason}", path.display())]
    Fixture { path: PathBuf, reason: String },

    #[error("Duplicate asset name: {0}")]
    DuplicateAsset(String),
}

impl DirectoryError {
    /// Whether asking again could succeed. Only a lost or refused
    /// connection qualifies; every other variant fails the same way each
    /// time.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Lookup service consumed by the instructor.
///
/// Implementations must be safe for concurrent reads.
#[async_trait]
pub trait AssetDirectory: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<AssetLookup, DirectoryError>;
}

#[async_trait]
impl<T: AssetDirectory + ?Sized> AssetDirectory for Arc<T> {
    async fn lookup(&self, name: &str) -> Result<AssetLookup, DirectoryError> {
        (**self).lookup(name).await
    }
}

#[async_trait]
impl<T: AssetDirectory + ?Sized> AssetDirectory for Box<T> {
    async fn lookup(&self, name: &str) -> Result<AssetLookup, DirectoryError> {
        (**self).lookup(name).await
    }
}
