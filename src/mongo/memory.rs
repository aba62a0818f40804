use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use mongodb::bson::Document;

use crate::mongo::fields::field_names_from_documents;
use crate::mongo::store::{DocumentStore, StoreError};

/// In-process [`DocumentStore`] that records every call it receives.
#[derive(Default)]
pub struct MemoryStore {
    database: String,
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
    field_failures: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn with_collections(names: &[&str]) -> Self {
        let collections = names.iter().map(|name| (name.to_string(), Vec::new())).collect();
        Self {
            database: "memory".to_string(),
            collections: Mutex::new(collections),
            ..Self::default()
        }
    }

    pub fn with_documents(mut self, collection: &str, documents: Vec<Document>) -> Self {
        self.collections
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(collection.to_string(), documents);
        self
    }

    pub fn failing_fields(mut self, collection: &str, message: &str) -> Self {
        self.field_failures.insert(collection.to_string(), message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(call);
    }
}

impl DocumentStore for MemoryStore {
    fn database_name(&self) -> &str {
        &self.database
    }

    fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.record("list_collection_names".to_string());
        let collections = self.collections.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(collections.keys().cloned().collect())
    }

    fn list_field_names(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        self.record(format!("list_field_names:{collection}"));
        if let Some(message) = self.field_failures.get(collection) {
            return Err(StoreError::Driver(message.clone()));
        }

        let collections = self.collections.lock().unwrap_or_else(PoisonError::into_inner);
        match collections.get(collection) {
            Some(documents) if !documents.is_empty() => Ok(field_names_from_documents(documents)),
            _ => Err(StoreError::NoSchema { collection: collection.to_string() }),
        }
    }

    fn add_collection(&self, name: &str) -> Result<(), StoreError> {
        self.record(format!("add_collection:{name}"));
        let mut collections = self.collections.lock().unwrap_or_else(PoisonError::into_inner);
        if collections.contains_key(name) {
            return Err(StoreError::Driver(format!(
                "Command failed with error 48 (NamespaceExists): Collection {}.{name} already exists.",
                self.database
            )));
        }
        collections.insert(name.to_string(), Vec::new());
        Ok(())
    }

    fn summarize_collection_counts(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        self.record("summarize_collection_counts".to_string());
        let collections = self.collections.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(collections
            .iter()
            .map(|(name, documents)| (name.clone(), documents.len() as u64))
            .collect())
    }
}
