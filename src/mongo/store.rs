use std::collections::BTreeMap;
use std::fmt;

use mongodb::bson::{Document, doc};
use mongodb::sync::Client;

use crate::mongo::fields::field_names_from_documents;

/// Upper bound on documents scanned when inferring a collection's fields.
pub const FIELD_SAMPLE_LIMIT: i64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotConnected,
    /// The collection holds no documents, so there is nothing to infer fields from.
    NoSchema { collection: String },
    Driver(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotConnected => f.write_str("no active connection"),
            StoreError::NoSchema { collection } => {
                write!(f, "collection \"{collection}\" has no documents to infer fields from")
            }
            StoreError::Driver(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(error: mongodb::error::Error) -> Self {
        StoreError::Driver(error.to_string())
    }
}

/// Data operations the UI needs from a document database.
pub trait DocumentStore: Send + Sync {
    fn database_name(&self) -> &str;

    fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;

    /// Field names observed in `collection`, in first-seen order.
    fn list_field_names(&self, collection: &str) -> Result<Vec<String>, StoreError>;

    /// Fails when the collection already exists.
    fn add_collection(&self, name: &str) -> Result<(), StoreError>;

    fn summarize_collection_counts(&self) -> Result<BTreeMap<String, u64>, StoreError>;
}

pub struct MongoStore {
    client: Client,
    database: String,
}

impl MongoStore {
    pub fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)?;
        Ok(Self { client, database: database.to_string() })
    }

    fn database(&self) -> mongodb::sync::Database {
        self.client.database(&self.database)
    }
}

impl DocumentStore for MongoStore {
    fn database_name(&self) -> &str {
        &self.database
    }

    fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.database().list_collection_names().run()?)
    }

    fn list_field_names(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        let cursor = self
            .database()
            .collection::<Document>(collection)
            .find(doc! {})
            .limit(FIELD_SAMPLE_LIMIT)
            .run()?;

        let mut sample = Vec::new();
        for document in cursor {
            sample.push(document?);
        }

        if sample.is_empty() {
            return Err(StoreError::NoSchema { collection: collection.to_string() });
        }

        Ok(field_names_from_documents(&sample))
    }

    fn add_collection(&self, name: &str) -> Result<(), StoreError> {
        self.database().create_collection(name).run()?;
        Ok(())
    }

    fn summarize_collection_counts(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        let database = self.database();
        let mut counts = BTreeMap::new();
        for name in database.list_collection_names().run()? {
            let count =
                database.collection::<Document>(&name).estimated_document_count().run()?;
            counts.insert(name, count);
        }
        Ok(counts)
    }
}
