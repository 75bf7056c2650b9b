//! HTTP server command
//!
//! Opens the MongoDB storage handle, runs the server until shutdown, then
//! closes the handle.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use herodex_server::{
    run_server, MemoryHeroRepo, MongoHeroRepo, ServerConfig, Storage,
};

/// Arguments for the serve command
///
/// Unset flags fall back to the environment (HOST, PORT, MONGODB_URI,
/// MONGODB_DATABASE, MONGODB_COLLECTION, STATIC_DIR, REQUEST_TIMEOUT_SECS).
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 0.0.0.0)
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (default: 3000)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// MongoDB connection string
    #[arg(long)]
    pub mongodb_uri: Option<String>,

    /// MongoDB database name
    #[arg(long)]
    pub database: Option<String>,

    /// MongoDB collection holding heroes
    #[arg(long)]
    pub collection: Option<String>,

    /// Directory of static assets (css, images)
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep heroes in memory instead of MongoDB (lost on exit)
    #[arg(long)]
    pub memory: bool,
}

impl ServeArgs {
    /// Override environment-derived settings with explicit flags.
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.bind_addr.set_ip(host);
        }
        if let Some(port) = self.port {
            config.bind_addr.set_port(port);
        }
        if let Some(uri) = &self.mongodb_uri {
            config.storage.uri = uri.clone();
        }
        if let Some(database) = &self.database {
            config.storage.database = database.clone();
        }
        if let Some(collection) = &self.collection {
            config.storage.collection = collection.clone();
        }
        if let Some(dir) = &self.static_dir {
            config.static_dir = dir.clone();
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = Duration::from_secs(secs);
        }
        config.cors_permissive |= self.cors_permissive;
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = ServerConfig::from_env().context("Invalid server configuration")?;
    args.apply(&mut config);

    if args.memory {
        tracing::warn!("Using in-memory storage; heroes are lost on exit");
        let repo = Arc::new(MemoryHeroRepo::new());
        return run_server(repo, &config).await.context("Server error");
    }

    let storage = Storage::open(&config.storage)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to MongoDB database '{}'. Set MONGODB_URI or --mongodb-uri",
                config.storage.database
            )
        })?;
    let repo = Arc::new(MongoHeroRepo::new(&storage));

    // Close storage even when the server fails
    let result = run_server(repo, &config).await;
    storage.close().await;

    result.context("Server error")
}
