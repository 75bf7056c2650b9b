//! Server configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `HOST` / `PORT`: bind address (default: 0.0.0.0:3000)
//! - `MONGODB_URI`: connection string (default: mongodb://localhost:27017)
//! - `MONGODB_DATABASE` / `MONGODB_COLLECTION`: where heroes live
//! - `STATIC_DIR`: static asset directory (default: public)
//! - `REQUEST_TIMEOUT_SECS`: per-request timeout (default: 30)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::db::StorageConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "herodex";
pub const DEFAULT_COLLECTION: &str = "superheroes";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration value that failed to parse
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Document store connection
    pub storage: StorageConfig,

    /// Static asset directory
    pub static_dir: PathBuf,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Allow any CORS origin (default: false)
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            storage: StorageConfig {
                uri: DEFAULT_MONGODB_URI.to_string(),
                database: DEFAULT_DATABASE.to_string(),
                collection: DEFAULT_COLLECTION.to_string(),
            },
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cors_permissive: false,
        }
    }
}

impl ServerConfig {
    /// Create config from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup (for testing)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host: IpAddr = match get("HOST") {
            Some(raw) => parse("HOST", &raw)?,
            None => defaults.bind_addr.ip(),
        };
        let port: u16 = match get("PORT") {
            Some(raw) => parse("PORT", &raw)?,
            None => DEFAULT_PORT,
        };
        let timeout_secs: u64 = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse("REQUEST_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            storage: StorageConfig {
                uri: get("MONGODB_URI").unwrap_or(defaults.storage.uri),
                database: get("MONGODB_DATABASE").unwrap_or(defaults.storage.database),
                collection: get("MONGODB_COLLECTION").unwrap_or(defaults.storage.collection),
            },
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            request_timeout: Duration::from_secs(timeout_secs),
            cors_permissive: false,
        })
    }
}

fn parse<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
