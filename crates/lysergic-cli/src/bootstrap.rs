//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - SQLite cache store (via lysergic-db)
//! - Erowid HTTP client (via lysergic-erowid)
//! - Core services (via lysergic-core)
//!
//! Command handlers receive the fully-composed `LysergicCore` and delegate
//! work to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use lysergic_core::paths::{database_path, database_path_in};
use lysergic_core::{CacheStore, ErowidClientPort, FeedConfig, LysergicCore};
use lysergic_db::{SqliteCacheStore, setup_database};
use lysergic_erowid::{DefaultErowidClient, ErowidClientConfig};

use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Base URL of the crawler API.
    pub server_url: String,
    /// Data directory override; the platform default is used when `None`.
    pub data_dir: Option<PathBuf>,
    /// Feed sizing.
    pub feed: FeedConfig,
}

impl CliConfig {
    /// Build config from parsed global arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            server_url: cli.server_url.clone(),
            data_dir: cli.data_dir.clone(),
            feed: FeedConfig::default(),
        }
    }

    /// Resolve the cache database path, creating its directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        let path = match &self.data_dir {
            Some(dir) => database_path_in(dir)?,
            None => database_path()?,
        };
        Ok(path)
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: LysergicCore,
    /// Configuration the context was built from.
    pub config: CliConfig,
}

impl CliContext {
    /// Access the core facade.
    pub const fn app(&self) -> &LysergicCore {
        &self.app
    }

    pub const fn config(&self) -> &CliConfig {
        &self.config
    }

    pub fn server_url(&self) -> &str {
        &self.config.server_url
    }
}

/// Bootstrap the CLI application.
///
/// 1. Opens the cache database with its schema and drops expired entries
/// 2. Creates the HTTP client for the crawler API
/// 3. Assembles `LysergicCore` from both
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    // 1. Cache database
    let db_path = config.database_path()?;
    let pool = setup_database(&db_path).await?;
    let sqlite = SqliteCacheStore::new(pool);
    if let Err(e) = sqlite.purge_expired(Utc::now()).await {
        tracing::warn!(error = %e, "Failed to purge expired cache entries");
    }
    let store: Arc<dyn CacheStore> = Arc::new(sqlite);

    // 2. HTTP client
    let client_config = ErowidClientConfig::new().with_base_url(config.server_url.clone());
    let client: Arc<dyn ErowidClientPort> = Arc::new(DefaultErowidClient::new(&client_config)?);

    tracing::debug!(db = %db_path.display(), server = %config.server_url, "CLI bootstrapped");

    Ok(bootstrap_with(client, store, config))
}

/// Bootstrap with injected adapters (for testing).
pub fn bootstrap_with(
    client: Arc<dyn ErowidClientPort>,
    store: Arc<dyn CacheStore>,
    config: CliConfig,
) -> CliContext {
    let app = LysergicCore::new(client, store).with_feed_config(config.feed);
    CliContext { app, config }
}
