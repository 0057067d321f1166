use std::path::PathBuf;

use anyhow::{Context, Result};
use asset_instructor::{
    AssetDirectory, AssetInstructor, DatabaseConfig, Dispatcher, InMemoryAssetDirectory,
    PostgresAssetDirectory, StdoutDispatcher,
};
use chrono::{DateTime, Utc};
use clap::Parser;
use instruction::InstructionRequest;
use tracing::{info, warn};

/// Validate an asset instruction and send it on to the control system.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Instruction start (RFC 3339, e.g. 2020-01-01T10:00:00Z)
    #[arg(long)]
    start: DateTime<Utc>,

    /// Instruction end (RFC 3339)
    #[arg(long)]
    end: DateTime<Utc>,

    /// Requested power level
    #[arg(long)]
    power: u32,

    /// Target asset name
    #[arg(long)]
    asset: String,

    /// Resolve assets from a .toml/.json fixture instead of Postgres
    #[arg(long)]
    assets_file: Option<PathBuf>,

    /// Database config file (TOML); individual --db-* flags override it
    #[arg(long)]
    db_config: Option<PathBuf>,

    /// Database host (overrides ASSETS_DB_HOST)
    #[arg(long)]
    db_host: Option<String>,

    /// Database port (overrides ASSETS_DB_PORT)
    #[arg(long)]
    db_port: Option<u16>,

    /// Database user (overrides ASSETS_DB_USER)
    #[arg(long)]
    db_user: Option<String>,

    /// Database password (overrides ASSETS_DB_PASSWORD)
    #[arg(long)]
    db_password: Option<String>,

    /// Database name (overrides ASSETS_DB_NAME)
    #[arg(long)]
    db_name: Option<String>,
}

impl Args {
    fn database_config(&self) -> Result<DatabaseConfig> {
        let mut config = match &self.db_config {
            Some(path) => DatabaseConfig::from_file(path)?,
            None => DatabaseConfig::from_env()?,
        };
        if let Some(host) = &self.db_host {
            config.host = host.clone();
        }
        if let Some(port) = self.db_port {
            config.port = port;
        }
        if let Some(user) = &self.db_user {
            config.user = user.clone();
        }
        if let Some(password) = &self.db_password {
            config.password = password.clone();
        }
        if let Some(dbname) = &self.db_name {
            config.dbname = dbname.clone();
        }
        Ok(config)
    }

    fn request(&self) -> InstructionRequest {
        InstructionRequest::new(self.start, self.end, self.power, self.asset.clone())
    }
}

async fn run<D: AssetDirectory>(directory: D, request: &InstructionRequest) -> Result<()> {
    let instructor = AssetInstructor::new(directory);
    let instruction = match instructor.process(request).await {
        Ok(instruction) => instruction,
        Err(e) => {
            warn!(category = %e.retry_category(), "Request not instructable");
            return Err(e.into());
        }
    };

    StdoutDispatcher::new()
        .dispatch(instruction)
        .await
        .context("Failed to dispatch instruction")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let request = args.request();
    info!(
        asset = %request.asset_name,
        power = request.power,
        start = %request.start,
        end = %request.end,
        "Instruction request received"
    );

    match &args.assets_file {
        Some(path) => {
            let directory = InMemoryAssetDirectory::from_file(path)?;
            info!(path = %path.display(), count = directory.len(), "Using asset fixture");
            run(directory, &request).await
        }
        None => {
            let config = args.database_config()?;
            let directory = PostgresAssetDirectory::connect(&config)
                .await
                .context("Failed to open asset directory")?;
            run(directory, &request).await
        }
    }
}
