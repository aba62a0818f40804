use std::collections::BTreeMap;
use std::sync::Arc;

use crate::mongo::store::{DocumentStore, MongoStore, StoreError};
use crate::settings::AppSettings;

pub type SharedStore = Arc<dyn DocumentStore>;

/// Result of a create-collection request together with the collection list
/// re-read afterwards.
#[derive(Debug, Clone)]
pub struct CreateCollectionOutcome {
    pub name: String,
    pub created: Result<(), StoreError>,
    pub collections: Result<Vec<String>, StoreError>,
}

pub fn open_store(settings: &AppSettings) -> Result<SharedStore, StoreError> {
    let store = MongoStore::connect(&settings.mongo_uri, &settings.mongo_database)?;
    log::info!(
        "opened store for database \"{}\" at {}",
        store.database_name(),
        settings.display_uri()
    );
    Ok(Arc::new(store))
}

pub fn fetch_collections(store: SharedStore) -> Result<Vec<String>, StoreError> {
    let mut names = store.list_collection_names()?;
    names.sort_unstable();
    Ok(names)
}

pub fn fetch_collection_counts(store: SharedStore) -> Result<BTreeMap<String, u64>, StoreError> {
    store.summarize_collection_counts()
}

pub fn fetch_field_names(store: SharedStore, collection: String) -> Result<Vec<String>, StoreError> {
    store.list_field_names(&collection)
}

/// The list is refreshed whether or not creation succeeded.
pub fn create_collection(store: SharedStore, name: String) -> CreateCollectionOutcome {
    let created = store.add_collection(&name);
    if let Err(error) = &created {
        log::warn!("creating collection \"{name}\" failed: {error}");
    }
    let collections = fetch_collections(store);
    CreateCollectionOutcome { name, created, collections }
}
