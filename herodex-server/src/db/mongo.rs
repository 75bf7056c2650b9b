//! MongoDB hero repository
//!
//! Single-document operations only:
//! - update: `findOneAndUpdate` with `$set`/`$unset`, returning the new document
//! - delete: `findOneAndDelete`, returning the removed document

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::models::{AgeFilter, AttributeQuery, Hero, HeroId, HeroPatch, NewHero};

use super::{HeroRepository, Storage, StoreError};

/// Repository over the hero collection
#[derive(Clone)]
pub struct MongoHeroRepo {
    heroes: Collection<Hero>,
}

impl MongoHeroRepo {
    pub fn new(storage: &Storage) -> Self {
        Self {
            heroes: storage.heroes(),
        }
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Hero>, StoreError> {
        let cursor = self.heroes.find(filter).await?;
        Ok(cursor.try_collect::<Vec<Hero>>().await?)
    }
}

/// `$set` and `$unset` sections for a patch; empty sections are left out.
fn update_document(patch: &HeroPatch) -> Document {
    let mut set = Document::new();
    let mut unset = Document::new();
    if let Some(alias) = &patch.alias {
        set.insert("nombreSuperHeroe", alias.as_str());
    }
    if let Some(real_name) = &patch.real_name {
        set.insert("nombreReal", real_name.as_str());
    }
    if let Some(age) = patch.age {
        set.insert("edad", age);
    }
    match &patch.origin {
        Some(Some(origin)) => {
            set.insert("planetaOrigen", origin.as_str());
        }
        Some(None) => {
            unset.insert("planetaOrigen", "");
        }
        None => {}
    }
    match &patch.weakness {
        Some(Some(weakness)) => {
            set.insert("debilidad", weakness.as_str());
        }
        Some(None) => {
            unset.insert("debilidad", "");
        }
        None => {}
    }
    if let Some(powers) = &patch.powers {
        set.insert("poderes", string_array(powers));
    }
    if let Some(allies) = &patch.allies {
        set.insert("aliados", string_array(allies));
    }
    if let Some(enemies) = &patch.enemies {
        set.insert("enemigos", string_array(enemies));
    }

    let mut update = Document::new();
    if !set.is_empty() {
        update.insert("$set", set);
    }
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    update
}

fn string_array(items: &[String]) -> Bson {
    Bson::Array(items.iter().cloned().map(Bson::String).collect())
}

#[async_trait]
impl HeroRepository for MongoHeroRepo {
    async fn create(&self, hero: NewHero) -> Result<Hero, StoreError> {
        let result = self
            .heroes
            .clone_with_type::<NewHero>()
            .insert_one(&hero)
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Internal(format!("unexpected inserted id {}", result.inserted_id)))?;

        tracing::debug!(id = %id, alias = %hero.alias, "Inserted hero");
        Ok(hero.with_id(HeroId::from(id)))
    }

    async fn get_by_id(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        Ok(self
            .heroes
            .find_one(doc! { "_id": id.object_id() })
            .await?)
    }

    async fn get_all(&self) -> Result<Vec<Hero>, StoreError> {
        self.find_many(Document::new()).await
    }

    async fn update_by_id(&self, id: HeroId, patch: HeroPatch) -> Result<Option<Hero>, StoreError> {
        let update = update_document(&patch);
        if update.is_empty() {
            // an update with no operators is rejected by the server
            return self.get_by_id(id).await;
        }

        Ok(self
            .heroes
            .find_one_and_update(doc! { "_id": id.object_id() }, update)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_by_id(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        Ok(self
            .heroes
            .find_one_and_delete(doc! { "_id": id.object_id() })
            .await?)
    }

    async fn find_by_attribute(&self, query: &AttributeQuery) -> Result<Vec<Hero>, StoreError> {
        self.find_many(query.to_filter()).await
    }

    async fn find_older_than(&self, filter: &AgeFilter) -> Result<Vec<Hero>, StoreError> {
        self.find_many(filter.to_filter()).await
    }
}
