//! Hero repository contract
//!
//! Every method is one independent round trip to the store:
//! - absence is `Ok(None)` or an empty list, never an error
//! - identifiers arrive pre-validated as [`HeroId`]
//! - `StoreError` means the store itself failed

use async_trait::async_trait;

use crate::models::{AgeFilter, AttributeQuery, Hero, HeroId, HeroPatch, NewHero};

/// Storage failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("internal store error: {0}")]
    Internal(String),
}

/// CRUD and search over the hero collection
#[async_trait]
pub trait HeroRepository: Send + Sync {
    /// Insert a hero, returning it with the assigned identifier.
    async fn create(&self, hero: NewHero) -> Result<Hero, StoreError>;

    async fn get_by_id(&self, id: HeroId) -> Result<Option<Hero>, StoreError>;

    /// All heroes in natural (insertion) order.
    async fn get_all(&self) -> Result<Vec<Hero>, StoreError>;

    /// Write the fields present in `patch`, returning the updated hero.
    async fn update_by_id(&self, id: HeroId, patch: HeroPatch) -> Result<Option<Hero>, StoreError>;

    /// Remove a hero, returning the deleted document.
    async fn delete_by_id(&self, id: HeroId) -> Result<Option<Hero>, StoreError>;

    async fn find_by_attribute(&self, query: &AttributeQuery) -> Result<Vec<Hero>, StoreError>;

    async fn find_older_than(&self, filter: &AgeFilter) -> Result<Vec<Hero>, StoreError>;
}
