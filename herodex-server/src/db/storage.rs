//! MongoDB storage handle
//!
//! Opened once at startup and passed to the repository explicitly.
//! The driver pools connections internally, so the handle is cheap to clone.

use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};

use crate::models::Hero;

use super::StoreError;

/// Connection settings for the document store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// Open connection to the document store
#[derive(Clone)]
pub struct Storage {
    client: Client,
    database: Database,
    collection: String,
}

impl Storage {
    /// Connect and ping the server, so a bad URI fails at startup instead of
    /// on the first request.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let storage = Storage::open(&config.storage).await?;
    /// let repo = MongoHeroRepo::new(&storage);
    /// ```
    pub async fn open(config: &StorageConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.database);
        database.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Connected to MongoDB"
        );

        Ok(Self {
            client,
            database,
            collection: config.collection.clone(),
        })
    }

    /// Collection holding hero documents.
    pub fn heroes(&self) -> Collection<Hero> {
        self.database.collection(&self.collection)
    }

    /// Close the client, waiting for in-flight operations to finish.
    pub async fn close(self) {
        self.client.shutdown().await;
        tracing::info!("MongoDB connection closed");
    }
}
