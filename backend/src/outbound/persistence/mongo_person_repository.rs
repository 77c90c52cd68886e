//! MongoDB-backed `PersonRepository` implementation.
//!
//! Each port call maps to exactly one driver call: `insert_one`, `find_one`,
//! `find` or `update_one`. Results pass through untouched apart from the
//! conversion between stored and domain documents.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use pagination::Window;

use crate::domain::ports::{PersonRepository, PersonRepositoryError};
use crate::domain::{Person, PersonId, PersonPatch};

use super::documents::{PersonDocument, set_document};
use super::mongo_error_mapping::{StoreFailure, classify};
use super::store::MongoStore;

/// MongoDB implementation of the `PersonRepository` port.
#[derive(Clone, Debug)]
pub struct MongoPersonRepository {
    collection: Collection<PersonDocument>,
}

impl MongoPersonRepository {
    /// Create a repository over the store's person collection.
    pub fn new(store: &MongoStore) -> Self {
        Self {
            collection: store.collection(),
        }
    }
}

/// Map driver errors to person repository errors.
fn map_mongo_error(error: mongodb::error::Error) -> PersonRepositoryError {
    match classify(&error) {
        StoreFailure::DuplicateKey(message) => PersonRepositoryError::duplicate_key(message),
        StoreFailure::RejectedValue(message) => PersonRepositoryError::invalid_document(message),
        StoreFailure::Timeout(message) => PersonRepositoryError::timeout(message),
        StoreFailure::Connection(message) => PersonRepositoryError::connection(message),
        StoreFailure::IndexConflict(message) | StoreFailure::Other(message) => {
            PersonRepositoryError::query(message)
        }
    }
}

#[async_trait]
impl PersonRepository for MongoPersonRepository {
    async fn insert(&self, person: &Person) -> Result<PersonId, PersonRepositoryError> {
        let document = PersonDocument::for_insert(person)?;
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(map_mongo_error)?;
        result
            .inserted_id
            .as_object_id()
            .map(PersonId::from_object_id)
            .ok_or_else(|| {
                PersonRepositoryError::query(format!(
                    "store assigned a non ObjectId identity: {}",
                    result.inserted_id
                ))
            })
    }

    async fn find_by_id(&self, id: &PersonId) -> Result<Person, PersonRepositoryError> {
        let document = self
            .collection
            .find_one(doc! { "_id": *id.as_object_id() })
            .await
            .map_err(map_mongo_error)?
            .ok_or_else(|| PersonRepositoryError::not_found(id.to_string()))?;
        document.into_person()
    }

    async fn list(&self, window: Window) -> Result<Vec<Person>, PersonRepositoryError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": -1 })
            .skip(window.signed_skip().unsigned_abs())
            .limit(window.signed_limit())
            .await
            .map_err(map_mongo_error)?;
        let documents: Vec<PersonDocument> =
            cursor.try_collect().await.map_err(map_mongo_error)?;
        documents
            .into_iter()
            .map(PersonDocument::into_person)
            .collect()
    }

    async fn update_by_id(
        &self,
        id: &PersonId,
        patch: &PersonPatch,
    ) -> Result<u64, PersonRepositoryError> {
        let set = set_document(patch)?;
        let result = self
            .collection
            .update_one(doc! { "_id": *id.as_object_id() }, doc! { "$set": set })
            .await
            .map_err(map_mongo_error)?;
        Ok(result.matched_count)
    }
}
