//! Person use cases.
//!
//! [`PersonService`] is the single entry point inbound adapters use to touch
//! person documents. Every store call runs under the per-request deadline and
//! store failures are translated into transport agnostic [`Error`] values:
//! duplicates and absences keep a client-facing message, everything else
//! becomes an internal error carrying the cause for the log.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use pagination::PageRequest;
use tracing::debug;

use crate::domain::ports::{PersonRepository, PersonRepositoryError};
use crate::domain::{Error, Person, PersonId, PersonPatch};

/// Message returned when no document matches the requested identity.
pub const PERSON_NOT_FOUND: &str = "person not found";
/// Message returned when a write collides with the `(username, email)` index.
pub const DUPLICATE_PERSON: &str = "username or email already exists";

/// Create, read and update operations over person documents.
#[derive(Clone)]
pub struct PersonService {
    repository: Arc<dyn PersonRepository>,
    deadline: Duration,
}

impl PersonService {
    /// Build a service over `repository`, bounding each store call by
    /// `deadline`.
    pub fn new(repository: Arc<dyn PersonRepository>, deadline: Duration) -> Self {
        Self {
            repository,
            deadline,
        }
    }

    /// Per-call store deadline.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Insert `person` and return it with the store-assigned identity.
    ///
    /// Any identity supplied by the caller is discarded.
    pub async fn create(&self, person: Person) -> Result<Person, Error> {
        let person = Person { id: None, ..person };
        let id = self
            .bounded(self.repository.insert(&person))
            .await
            .map_err(Self::map_write_error)?;
        Ok(person.with_id(id))
    }

    /// Fetch the document with identity `id`.
    pub async fn get(&self, id: &PersonId) -> Result<Person, Error> {
        self.bounded(self.repository.find_by_id(id))
            .await
            .map_err(Self::map_read_error)
    }

    /// Fetch one page of documents, newest first.
    pub async fn list(&self, page: PageRequest) -> Result<Vec<Person>, Error> {
        self.bounded(self.repository.list(page.window()))
            .await
            .map_err(Self::map_read_error)
    }

    /// Apply `patch` to the document with identity `id` and echo the patch
    /// back on success.
    pub async fn update(&self, id: &PersonId, patch: PersonPatch) -> Result<PersonPatch, Error> {
        let matched = self
            .bounded(self.repository.update_by_id(id, &patch))
            .await
            .map_err(Self::map_write_error)?;
        match matched {
            1 => Ok(patch),
            0 => {
                debug!(person_id = %id, "update matched no document");
                Err(Error::not_found(PERSON_NOT_FOUND))
            }
            other => Err(Error::internal(format!(
                "update by identity matched {other} documents"
            ))),
        }
    }

    async fn bounded<T, Fut>(&self, call: Fut) -> Result<T, PersonRepositoryError>
    where
        Fut: Future<Output = Result<T, PersonRepositoryError>>,
    {
        tokio::time::timeout(self.deadline, call)
            .await
            .unwrap_or_else(|_| {
                Err(PersonRepositoryError::timeout(format!(
                    "no answer within {} ms",
                    self.deadline.as_millis()
                )))
            })
    }

    fn map_write_error(error: PersonRepositoryError) -> Error {
        match error {
            PersonRepositoryError::DuplicateKey { message } => {
                debug!(cause = %message, "write rejected by unique index");
                Error::duplicate_key(DUPLICATE_PERSON)
            }
            other => Self::map_read_error(other),
        }
    }

    fn map_read_error(error: PersonRepositoryError) -> Error {
        match error {
            PersonRepositoryError::NotFound { .. } => Error::not_found(PERSON_NOT_FOUND),
            // Store rejections carry driver text; it stays in the log.
            other => Error::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "person_service_tests.rs"]
mod tests;
