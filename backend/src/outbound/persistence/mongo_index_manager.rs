//! MongoDB-backed `IndexManager` implementation.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::Document;
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use tracing::info;

use crate::domain::ports::{IndexManager, IndexManagerError, UniqueIndex};

use super::mongo_error_mapping::{StoreFailure, classify};
use super::store::MongoStore;

/// Installs unique indexes on the person collection with a server-side
/// time budget.
#[derive(Clone, Debug)]
pub struct MongoIndexManager {
    collection: Collection<Document>,
    max_time: Duration,
}

impl MongoIndexManager {
    /// Create a manager whose `createIndexes` calls are bounded by
    /// `max_time`.
    pub fn new(store: &MongoStore, max_time: Duration) -> Self {
        Self {
            collection: store.raw_collection(),
            max_time,
        }
    }
}

fn index_model(index: &UniqueIndex) -> IndexModel {
    let keys = index
        .keys()
        .iter()
        .fold(Document::new(), |mut keys, field| {
            keys.insert(field.as_str(), 1_i32);
            keys
        });
    let options = IndexOptions::builder()
        .unique(true)
        .name(index.name().to_owned())
        .build();
    IndexModel::builder().keys(keys).options(options).build()
}

/// Map driver errors to index manager errors.
fn map_mongo_error(error: mongodb::error::Error) -> IndexManagerError {
    match classify(&error) {
        StoreFailure::Timeout(message) => IndexManagerError::timeout(message),
        StoreFailure::Connection(message) => IndexManagerError::connection(message),
        StoreFailure::IndexConflict(message) | StoreFailure::DuplicateKey(message) => {
            IndexManagerError::conflict(message)
        }
        StoreFailure::RejectedValue(message) | StoreFailure::Other(message) => {
            IndexManagerError::command(message)
        }
    }
}

#[async_trait]
impl IndexManager for MongoIndexManager {
    async fn ensure_unique_index(&self, index: &UniqueIndex) -> Result<(), IndexManagerError> {
        let created = self
            .collection
            .create_index(index_model(index))
            .max_time(self.max_time)
            .await
            .map_err(map_mongo_error)?;
        info!(
            index = %created.index_name,
            collection = self.collection.name(),
            "unique index in place"
        );
        Ok(())
    }
}
