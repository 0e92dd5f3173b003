use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{memory_store::MemoryStore, mongodb_store::MongoDBStore};
use crate::config::StoreConfig;
use crate::models::Message;

/// The Store trait abstracts the one-record-per-user paste storage.
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts or replaces the record keyed by `message.identifier`.
    async fn put_message(&self, message: &Message) -> Result<(), String>;
    /// Fetches the record for `identifier`, if one was ever stored.
    async fn get_message(&self, identifier: &str) -> Result<Option<Message>, String>;
}

/// Creates a concrete store implementation based on the StoreConfig.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn Store>, String> {
    match config {
        StoreConfig::MongoDB(mongo_config) => {
            let store = MongoDBStore::new(mongo_config).await?;
            info!("Successfully created MongoDB store.");
            Ok(Arc::new(store))
        }
        StoreConfig::Memory => {
            info!("Using in-memory store; paste records will not survive a restart.");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_memory_store() {
        let store = create_store(&StoreConfig::Memory).await.unwrap();
        store.put_message(&Message::new("u1", "hi")).await.unwrap();
        assert!(store.get_message("u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_mongo_store_rejects_bad_uri() {
        let config = StoreConfig::MongoDB(crate::store::mongodb_store::MongoDBConfig {
            uri: "not-a-mongodb-uri".to_string(),
            database: "copypasta".to_string(),
            collection: "copies".to_string(),
        });
        assert!(create_store(&config).await.is_err());
    }
}
