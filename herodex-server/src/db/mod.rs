//! Database layer - storage handle and hero repositories
//!
//! # Design Principles
//!
//! - Storage handle opened once at startup, injected into the repository
//! - Single-document operations; last write wins on concurrent updates
//! - "Not found" is `None`, never an error

pub mod memory;
pub mod mongo;
pub mod repo;
pub mod storage;

pub use memory::MemoryHeroRepo;
pub use mongo::MongoHeroRepo;
pub use repo::{HeroRepository, StoreError};
pub use storage::{Storage, StorageConfig};
