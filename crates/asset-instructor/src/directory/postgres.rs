use std::sync::Arc;

use async_trait::async_trait;
use instruction::Asset;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, error, info};

use super::{AssetDirectory, AssetLookup, DirectoryError};
use crate::config::DatabaseConfig;

const LOOKUP_SQL: &str = "SELECT name, max_power, technology FROM assets WHERE name = $1";

/// Asset directory backed by the `assets` table.
///
/// Expected schema:
///
/// ```sql
/// CREATE TABLE assets (
///     name       TEXT PRIMARY KEY,
///     max_power  INTEGER NOT NULL,
///     technology TEXT NOT NULL
/// );
/// ```
pub struct PostgresAssetDirectory {
    client: Client,
}

impl PostgresAssetDirectory {
    /// Open a connection and spawn its driver on the current tokio runtime.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DirectoryError> {
        let (client, connection) = config
            .to_pg_config()
            .connect(NoTls)
            .await
            .map_err(|e| DirectoryError::Connection(format!("{}: {e}", config.endpoint())))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "Asset database connection terminated");
            }
        });

        info!(endpoint = %config.endpoint(), "Connected to asset database");
        Ok(Self { client })
    }

    /// Wrap an already-connected client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn asset_from_row(row: &Row) -> Result<Asset, DirectoryError> {
    let name: String = row
        .try_get("name")
        .map_err(|e| DirectoryError::Query(e.to_string()))?;

    let corrupt = |reason: String| DirectoryError::CorruptRecord {
        name: name.clone(),
        reason,
    };

    let raw_max: i32 = row.try_get("max_power").map_err(|e| corrupt(e.to_string()))?;
    let max_power =
        u32::try_from(raw_max).map_err(|_| corrupt(format!("negative max_power {raw_max}")))?;
    let technology: String = row.try_get("technology").map_err(|e| corrupt(e.to_string()))?;

    Ok(Asset {
        name,
        max_power,
        technology,
    })
}

#[async_trait]
impl AssetDirectory for PostgresAssetDirectory {
    async fn lookup(&self, name: &str) -> Result<AssetLookup, DirectoryError> {
        let row = self
            .client
            .query_opt(LOOKUP_SQL, &[&name])
            .await
            .map_err(|e| {
                if self.client.is_closed() {
                    DirectoryError::Connection(e.to_string())
                } else {
                    DirectoryError::Query(e.to_string())
                }
            })?;

        match row {
            Some(row) => {
                let asset = asset_from_row(&row)?;
                debug!(asset = %asset, "Asset resolved from database");
                Ok(AssetLookup::Found(Arc::new(asset)))
            }
            None => Ok(AssetLookup::NotFound),
        }
    }
}
