//! In-memory hero repository
//!
//! Same contract as the MongoDB repository, backed by a `Vec` behind a
//! `tokio::sync::RwLock`. Used by tests and `herodex serve --memory`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{AgeFilter, AttributeQuery, Hero, HeroId, HeroPatch, NewHero};

use super::{HeroRepository, StoreError};

/// Hero repository held in process memory
#[derive(Default)]
pub struct MemoryHeroRepo {
    heroes: RwLock<Vec<Hero>>,
}

impl MemoryHeroRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with heroes (ids are assigned here).
    pub fn with_heroes(heroes: impl IntoIterator<Item = NewHero>) -> Self {
        let heroes = heroes
            .into_iter()
            .map(|hero| hero.with_id(HeroId::generate()))
            .collect();
        Self {
            heroes: RwLock::new(heroes),
        }
    }

    pub async fn len(&self) -> usize {
        self.heroes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.heroes.read().await.is_empty()
    }

    async fn filtered(&self, keep: impl Fn(&Hero) -> bool) -> Vec<Hero> {
        self.heroes
            .read()
            .await
            .iter()
            .filter(|hero| keep(hero))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HeroRepository for MemoryHeroRepo {
    async fn create(&self, hero: NewHero) -> Result<Hero, StoreError> {
        let hero = hero.with_id(HeroId::generate());
        self.heroes.write().await.push(hero.clone());
        Ok(hero)
    }

    async fn get_by_id(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        Ok(self.heroes.read().await.iter().find(|h| h.id == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Hero>, StoreError> {
        Ok(self.heroes.read().await.clone())
    }

    async fn update_by_id(&self, id: HeroId, patch: HeroPatch) -> Result<Option<Hero>, StoreError> {
        let mut heroes = self.heroes.write().await;
        Ok(heroes.iter_mut().find(|h| h.id == id).map(|hero| {
            patch.apply(&mut hero.fields);
            hero.clone()
        }))
    }

    async fn delete_by_id(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        let mut heroes = self.heroes.write().await;
        let position = heroes.iter().position(|h| h.id == id);
        Ok(position.map(|index| heroes.remove(index)))
    }

    async fn find_by_attribute(&self, query: &AttributeQuery) -> Result<Vec<Hero>, StoreError> {
        Ok(self.filtered(|hero| query.matches(&hero.fields)).await)
    }

    async fn find_older_than(&self, filter: &AgeFilter) -> Result<Vec<Hero>, StoreError> {
        Ok(self.filtered(|hero| filter.matches(&hero.fields)).await)
    }
}
