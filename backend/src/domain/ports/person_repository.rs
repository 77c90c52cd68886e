//! Port abstraction for person persistence adapters and their errors.
//!
//! Adapters pass calls straight through to the store. They never retry or
//! cache; their only job besides I/O is classifying native store failures into
//! [`PersonRepositoryError`] so callers can tell a uniqueness violation from a
//! generic fault.

use async_trait::async_trait;
use pagination::Window;

use crate::domain::{Person, PersonId, PersonPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by person repository adapters.
    pub enum PersonRepositoryError {
        /// A write would violate a unique index.
        DuplicateKey { message: String } =>
            "person write violates a unique index: {message}",
        /// No document has the requested identity.
        NotFound { id: String } => "person {id} not found",
        /// The store could not be reached or the connection dropped.
        Connection { message: String } =>
            "person store connection failed: {message}",
        /// The store did not answer within the deadline.
        Timeout { message: String } =>
            "person store call timed out: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "person store query failed: {message}",
        /// A value could not be converted to or from the stored form.
        InvalidDocument { message: String } =>
            "person document could not be encoded: {message}",
    }
}

/// Port for reading and writing person documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert a new document and return the identity the store assigned.
    ///
    /// Any identity already set on `person` is ignored.
    async fn insert(&self, person: &Person) -> Result<PersonId, PersonRepositoryError>;

    /// Fetch a single document by identity.
    ///
    /// Returns [`PersonRepositoryError::NotFound`] when no document matches.
    async fn find_by_id(&self, id: &PersonId) -> Result<Person, PersonRepositoryError>;

    /// List documents ordered by identity, newest first, restricted to
    /// `window`.
    async fn list(&self, window: Window) -> Result<Vec<Person>, PersonRepositoryError>;

    /// Apply `patch` as a field-level set on the document with identity `id`.
    ///
    /// Returns the number of documents the filter matched: `0` or `1`.
    async fn update_by_id(
        &self,
        id: &PersonId,
        patch: &PersonPatch,
    ) -> Result<u64, PersonRepositoryError>;
}
