use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Store;
use crate::models::Message;

/// In-memory store keyed by identifier.
pub struct MemoryStore {
    messages: RwLock<HashMap<String, Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            messages: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn put_message(&self, message: &Message) -> Result<(), String> {
        self.messages
            .write()
            .await
            .insert(message.identifier.clone(), message.clone());
        Ok(())
    }

    async fn get_message(&self, identifier: &str) -> Result<Option<Message>, String> {
        Ok(self.messages.read().await.get(identifier).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get_returns_same_text() {
        let store = MemoryStore::new();
        store.put_message(&Message::new("u1", "hello")).await.unwrap();

        let stored = store.get_message("u1").await.unwrap().unwrap();
        assert_eq!(stored.identifier, "u1");
        assert_eq!(stored.text, "hello");
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryStore::new();
        store.put_message(&Message::new("u1", "first")).await.unwrap();
        store.put_message(&Message::new("u1", "second")).await.unwrap();
        assert_eq!(store.get_message("u1").await.unwrap().unwrap().text, "second");
    }

    #[tokio::test]
    async fn test_records_are_per_identifier() {
        let store = MemoryStore::new();
        store.put_message(&Message::new("u1", "mine")).await.unwrap();
        assert!(store.get_message("u2").await.unwrap().is_none());
    }
}
