use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ReplaceOptions};
use mongodb::{Client, Collection};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::Message;
use crate::store::Store;

/// The config struct for MongoDB connections.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone)]
pub struct MongoDBConfig {
    pub uri: String,
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    "copies".to_string()
}

/// A concrete `Store` implementation that uses MongoDB.
///
/// One document per user, with the identifier as `_id`, so an upsert by key
/// is atomic without any coordination on our side.
pub struct MongoDBStore {
    collection: Collection<MessageDocument>,
}

/// Document shape for storing paste records in MongoDB.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
struct MessageDocument {
    _id: String,
    text: String,
    time: i64,
}

impl MongoDBStore {
    /// Creates a new `MongoDBStore` from the given config.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on first use.
    pub async fn new(config: &MongoDBConfig) -> Result<Self, String> {
        info!("Connecting to MongoDB at URI: {}", config.uri);

        let mut client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| format!("Failed to parse MongoDB URI: {}", e))?;
        client_options.app_name = Some("copypasta".to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| format!("Failed to create MongoDB client: {}", e))?;

        let collection = client
            .database(&config.database)
            .collection::<MessageDocument>(&config.collection);

        Ok(Self { collection })
    }

    fn message_to_doc(message: &Message) -> MessageDocument {
        MessageDocument {
            _id: message.identifier.clone(),
            text: message.text.clone(),
            time: message.time,
        }
    }

    fn doc_to_message(doc: MessageDocument) -> Message {
        Message {
            identifier: doc._id,
            text: doc.text,
            time: doc.time,
        }
    }
}

#[async_trait]
impl Store for MongoDBStore {
    async fn put_message(&self, message: &Message) -> Result<(), String> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection
            .replace_one(
                doc! { "_id": &message.identifier },
                Self::message_to_doc(message),
                options,
            )
            .await
            .map_err(|e| format!("Failed to store paste record: {}", e))?;

        debug!("Stored paste record for '{}'", message.identifier);
        Ok(())
    }

    async fn get_message(&self, identifier: &str) -> Result<Option<Message>, String> {
        let doc = self
            .collection
            .find_one(doc! { "_id": identifier }, None)
            .await
            .map_err(|e| format!("Failed to fetch paste record: {}", e))?;

        Ok(doc.map(Self::doc_to_message))
    }
}
