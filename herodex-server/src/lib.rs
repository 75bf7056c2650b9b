//! herodex-server: superhero records over HTTP
//!
//! Browser pages and a JSON API on top of a MongoDB collection.
//! The storage handle is opened by the caller and injected through a
//! [`db::HeroRepository`], so the same router runs against MongoDB or the
//! in-memory repository used in tests.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod views;

pub use config::{ConfigError, ServerConfig};
pub use db::{HeroRepository, MemoryHeroRepo, MongoHeroRepo, Storage, StorageConfig, StoreError};
pub use http::{build_router, run_server, RouterConfig};
