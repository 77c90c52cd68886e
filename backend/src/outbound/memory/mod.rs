//! In-memory person store.
//!
//! [`InMemoryPersonRepository`] implements the same ports as the MongoDB
//! adapters and mimics the store semantics the HTTP layer relies on:
//! increasing ObjectId identities, unique index enforcement (missing fields
//! index as `null`), newest-first listing, and `$set` with dotted paths. It
//! backs the HTTP behaviour tests and local runs without a database.
//!
//! Failures can be injected with [`InMemoryPersonRepository::fail_with`] to
//! exercise error paths.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use pagination::Window;
use serde_json::{Map, Value};

use crate::domain::person::fields;
use crate::domain::ports::{
    IndexManager, IndexManagerError, PersonRepository, PersonRepositoryError, UniqueIndex,
};
use crate::domain::{Person, PersonId, PersonPatch};
use crate::outbound::json_numbers::widen_unsigned;

#[derive(Debug, Default)]
struct State {
    documents: BTreeMap<ObjectId, Map<String, Value>>,
    indexes: Vec<UniqueIndex>,
    failure: Option<PersonRepositoryError>,
    calls: usize,
}

impl State {
    fn begin(&mut self) -> Result<(), PersonRepositoryError> {
        self.calls += 1;
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn duplicate_of(
        &self,
        candidate: &Map<String, Value>,
        exclude: Option<&ObjectId>,
    ) -> Option<String> {
        self.indexes.iter().find_map(|index| {
            let key = index_key(index, candidate);
            self.documents
                .iter()
                .filter(|(id, _)| Some(*id) != exclude)
                .any(|(_, document)| index_key(index, document) == key)
                .then(|| {
                    format!(
                        "E11000 duplicate key error index: {} dup key: {}",
                        index.name(),
                        Value::Array(key)
                    )
                })
        })
    }
}

/// Thread-safe in-memory person store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersonRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryPersonRepository {
    /// Create an empty store with no indexes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `error` until [`Self::recover`].
    pub fn fail_with(&self, error: PersonRepositoryError) {
        self.lock().failure = Some(error);
    }

    /// Clear an injected failure.
    pub fn recover(&self) {
        self.lock().failure = None;
    }

    /// Number of port calls received, including failed ones.
    pub fn call_count(&self) -> usize {
        self.lock().calls
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.lock().documents.len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.lock().documents.is_empty()
    }

    /// Raw stored fields of a document, including fields outside the person
    /// schema.
    pub fn stored_fields(&self, id: &PersonId) -> Option<Map<String, Value>> {
        self.lock().documents.get(id.as_object_id()).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn lookup<'a>(document: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    segments.try_fold(document.get(first)?, |value, segment| {
        value.as_object()?.get(segment)
    })
}

fn index_key(index: &UniqueIndex, document: &Map<String, Value>) -> Vec<Value> {
    index
        .keys()
        .iter()
        .map(|key| lookup(document, key).cloned().unwrap_or(Value::Null))
        .collect()
}

fn check_path(path: &str) -> Result<(), PersonRepositoryError> {
    if path.split('.').any(str::is_empty) {
        return Err(PersonRepositoryError::invalid_document(format!(
            "empty field name in {path:?}"
        )));
    }
    if path.split('.').any(|segment| segment.starts_with('$')) {
        return Err(PersonRepositoryError::invalid_document(format!(
            "dollar-prefixed field name in {path:?}"
        )));
    }
    if path == fields::ID || path.starts_with("_id.") {
        return Err(PersonRepositoryError::invalid_document(
            "field '_id' is immutable",
        ));
    }
    Ok(())
}

fn set_path(
    document: &mut Map<String, Value>,
    path: &str,
    value: Value,
) -> Result<(), PersonRepositoryError> {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };
    let mut target = document;
    for segment in parents.into_iter().flat_map(|parents| parents.split('.')) {
        target = target
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| {
                PersonRepositoryError::invalid_document(format!(
                    "cannot create field {segment:?} in {path:?}: parent is not an object"
                ))
            })?;
    }
    target.insert(leaf.to_owned(), value);
    Ok(())
}

fn to_person(
    id: ObjectId,
    document: &Map<String, Value>,
) -> Result<Person, PersonRepositoryError> {
    let person: Person = serde_json::from_value(Value::Object(document.clone()))
        .map_err(|err| {
            PersonRepositoryError::query(format!("stored document is malformed: {err}"))
        })?;
    Ok(person.with_id(PersonId::from_object_id(id)))
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn insert(&self, person: &Person) -> Result<PersonId, PersonRepositoryError> {
        let mut state = self.lock();
        state.begin()?;
        let draft = Person {
            id: None,
            ..person.clone()
        };
        let document = match serde_json::to_value(&draft).map(widen_unsigned) {
            Ok(Value::Object(document)) => document,
            Ok(other) => {
                return Err(PersonRepositoryError::invalid_document(format!(
                    "person encoded as {other}"
                )));
            }
            Err(err) => return Err(PersonRepositoryError::invalid_document(err.to_string())),
        };
        if let Some(message) = state.duplicate_of(&document, None) {
            return Err(PersonRepositoryError::duplicate_key(message));
        }
        let id = ObjectId::new();
        state.documents.insert(id, document);
        Ok(PersonId::from_object_id(id))
    }

    async fn find_by_id(&self, id: &PersonId) -> Result<Person, PersonRepositoryError> {
        let mut state = self.lock();
        state.begin()?;
        let oid = *id.as_object_id();
        let document = state
            .documents
            .get(&oid)
            .ok_or_else(|| PersonRepositoryError::not_found(id.to_string()))?;
        to_person(oid, document)
    }

    async fn list(&self, window: Window) -> Result<Vec<Person>, PersonRepositoryError> {
        let mut state = self.lock();
        state.begin()?;
        window
            .apply(state.documents.iter().rev())
            .map(|(id, document)| to_person(*id, document))
            .collect()
    }

    async fn update_by_id(
        &self,
        id: &PersonId,
        patch: &PersonPatch,
    ) -> Result<u64, PersonRepositoryError> {
        let mut state = self.lock();
        state.begin()?;
        for path in patch.fields().keys() {
            check_path(path)?;
        }
        let oid = *id.as_object_id();
        let Some(current) = state.documents.get(&oid) else {
            return Ok(0);
        };
        let mut updated = current.clone();
        for (path, value) in patch.fields() {
            set_path(&mut updated, path, widen_unsigned(value.clone()))?;
        }
        if let Some(message) = state.duplicate_of(&updated, Some(&oid)) {
            return Err(PersonRepositoryError::duplicate_key(message));
        }
        state.documents.insert(oid, updated);
        Ok(1)
    }
}

#[async_trait]
impl IndexManager for InMemoryPersonRepository {
    async fn ensure_unique_index(&self, index: &UniqueIndex) -> Result<(), IndexManagerError> {
        let mut state = self.lock();
        state
            .begin()
            .map_err(|err| IndexManagerError::command(err.to_string()))?;
        if let Some(existing) = state.indexes.iter().find(|known| known.name() == index.name()) {
            if existing == index {
                return Ok(());
            }
            return Err(IndexManagerError::conflict(format!(
                "index {} exists with different keys",
                index.name()
            )));
        }
        let mut seen = Vec::with_capacity(state.documents.len());
        for document in state.documents.values() {
            let key = index_key(index, document);
            if seen.contains(&key) {
                return Err(IndexManagerError::conflict(format!(
                    "E11000 duplicate key error index: {} dup key: {}",
                    index.name(),
                    Value::Array(key)
                )));
            }
            seen.push(key);
        }
        state.indexes.push(index.clone());
        Ok(())
    }
}
