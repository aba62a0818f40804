#![cfg(test)]

use crate::mongo::connection::{self, SharedStore};
use crate::mongo::store::{DocumentStore, MongoStore, StoreError};
use crate::settings::AppSettings;
use crate::{App, Message};
use mongodb::bson::{Document, doc};
use mongodb::sync::Client;
use std::env;
use std::sync::Arc;
use uuid::Uuid;

const TEST_URI_VAR: &str = "COLLECTION_MANAGER_TEST_URI";

/// Drops the scratch database when the test ends, pass or fail.
struct DatabaseGuard {
    client: Client,
    name: String,
}

impl Drop for DatabaseGuard {
    fn drop(&mut self) {
        let _ = self.client.database(&self.name).drop().run();
    }
}

#[test]
fn collection_flow_against_live_server() {
    let uri = match env::var(TEST_URI_VAR) {
        Ok(value) => value,
        Err(_) => {
            eprintln!("skipping collection_flow_against_live_server: {TEST_URI_VAR} not provided");
            return;
        }
    };

    let database = format!("cm-test-{}", Uuid::new_v4().simple());
    let client = Client::with_uri_str(&uri).expect("failed to build client for test URI");
    let _guard = DatabaseGuard { client: client.clone(), name: database.clone() };

    let settings = AppSettings {
        mongo_uri: uri.clone(),
        mongo_database: database.clone(),
        ..AppSettings::default()
    };
    let store: SharedStore = Arc::new(
        MongoStore::connect(&settings.mongo_uri, &settings.mongo_database)
            .expect("failed to open store"),
    );
    let (mut app, _) = App::new(settings, Ok(store.clone()));

    //
    // Step 1: Create a collection through the New Collection tab.
    //
    let collection = format!("parts-{}", Uuid::new_v4().simple());
    let _ = app.update(Message::NewCollectionNameChanged(collection.clone()));
    let _ = app.update(Message::NewCollectionSubmitted);
    let outcome = connection::create_collection(store.clone(), collection.clone());
    assert_eq!(outcome.created, Ok(()));
    let _ = app.update(Message::CollectionCreated(outcome));
    assert_eq!(app.collections, vec![collection.clone()]);

    //
    // Step 2: Creating it again fails but the list is still refreshed.
    //
    let duplicate = connection::create_collection(store.clone(), collection.clone());
    assert!(matches!(duplicate.created, Err(StoreError::Driver(_))));
    assert_eq!(duplicate.collections, Ok(vec![collection.clone()]));

    //
    // Step 3: An empty collection has no inferable fields.
    //
    assert_eq!(
        store.list_field_names(&collection),
        Err(StoreError::NoSchema { collection: collection.clone() })
    );

    //
    // Step 4: Insert documents and render the Add One form from them.
    //
    client
        .database(&database)
        .collection::<Document>(&collection)
        .insert_many(vec![
            doc! { "sku": "A-1", "name": "bolt" },
            doc! { "sku": "A-2", "price": 0.25 },
        ])
        .run()
        .expect("failed to seed documents");

    let _ = app.update(Message::AddOneCollectionSelected(collection.clone()));
    let result = connection::fetch_field_names(store.clone(), collection.clone());
    let _ = app.update(Message::FieldsLoaded { collection: collection.clone(), result });
    let names: Vec<_> = app.add_one.rows().iter().map(|row| row.name.clone()).collect();
    assert_eq!(names, vec!["sku", "name", "price"]);

    //
    // Step 5: Counts reflect the inserted documents.
    //
    let counts = store.summarize_collection_counts().expect("failed to count documents");
    assert_eq!(counts.get(&collection), Some(&2));
}
