//! Helpers for suites that need a live document store.
//!
//! Set `PERSON_API_TEST_MONGO_URI` to run them; otherwise each test prints a
//! skip marker and returns early so CI without a store stays green.

use mongodb::bson::oid::ObjectId;
use person_api::outbound::persistence::{MongoStore, StoreConfig};

const URI_VAR: &str = "PERSON_API_TEST_MONGO_URI";

/// Connect to a throwaway database on the configured store.
///
/// Returns `None` when the URI variable is unset. Panics when it is set but
/// the store cannot be reached, so a misconfigured CI run is not masked.
pub async fn scratch_store() -> Option<MongoStore> {
    let Ok(uri) = std::env::var(URI_VAR) else {
        eprintln!("SKIP-TEST-MONGO: {URI_VAR} is not set");
        return None;
    };
    let database = format!("person_api_test_{}", ObjectId::new().to_hex());
    let config = StoreConfig::new(uri).with_database(database);
    match MongoStore::connect(config).await {
        Ok(store) => Some(store),
        Err(err) => panic!("test store unreachable: {err}. Unset {URI_VAR} to skip."),
    }
}

/// Drop the scratch database and close the client.
pub async fn discard(store: MongoStore) {
    if let Err(err) = store.database().drop().await {
        eprintln!("failed to drop scratch database: {err}");
    }
    store.close().await;
}
