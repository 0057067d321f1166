use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Connection parameters for the Postgres asset database.
///
/// Passed explicitly to [`crate::directory::PostgresAssetDirectory::connect`];
/// validation itself never sees it.
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    /// Upper bound on establishing the connection.
    #[serde(default = "default_connect_timeout", with = "secs")]
    pub connect_timeout: Duration,
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

mod secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

/// Read `key` from `vars`, parsing it when present. A value that is set
/// but does not parse is an error naming the variable.
fn parsed_var<T>(vars: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match vars(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {key}={raw:?}")),
        None => Ok(None),
    }
}

impl DatabaseConfig {
    /// Read `ASSETS_DB_*` from the environment, falling back to local
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `vars`.
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: vars("ASSETS_DB_HOST").unwrap_or_else(|| "localhost".into()),
            port: parsed_var(&vars, "ASSETS_DB_PORT")?.unwrap_or(5432),
            user: vars("ASSETS_DB_USER").unwrap_or_else(|| "postgres".into()),
            password: vars("ASSETS_DB_PASSWORD").unwrap_or_else(|| "password".into()),
            dbname: vars("ASSETS_DB_NAME").unwrap_or_else(|| "assets".into()),
            connect_timeout: parsed_var(&vars, "ASSETS_DB_CONNECT_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or_else(default_connect_timeout),
        })
    }

    /// Load from a TOML file with the same field names.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read database config {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse database config {}", path.display()))
    }

    /// Build the driver-level config.
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut pg = tokio_postgres::Config::new();
        pg.host(&self.host)
            .port(self.port)
            .user(&self.user)
            .password(&self.password)
            .dbname(&self.dbname)
            .connect_timeout(self.connect_timeout)
            .application_name("asset-instructor");
        pg
    }

    /// `host:port/dbname`, safe to log.
    pub fn endpoint(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.dbname)
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
