//! Partial update payload for person documents.
//!
//! The patch is an ordered field -> value mapping. Keys are not checked
//! against the [`crate::domain::Person`] schema: callers may set any field,
//! including nested keys inside `data` via dotted paths, and the mapping is
//! applied verbatim by the store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised when building a [`PersonPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonPatchError {
    /// An update must set at least one field.
    #[error("update body must contain at least one field")]
    Empty,
}

/// Ordered set of field assignments applied with a `$set` update.
///
/// ## Invariants
/// - Contains at least one field.
/// - Preserves the order in which the client supplied the fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct PersonPatch(Map<String, Value>);

impl PersonPatch {
    /// Validate and construct a patch.
    ///
    /// # Errors
    /// Returns [`PersonPatchError::Empty`] when `fields` is empty.
    pub fn new(fields: Map<String, Value>) -> Result<Self, PersonPatchError> {
        if fields.is_empty() {
            return Err(PersonPatchError::Empty);
        }
        Ok(Self(fields))
    }

    /// Borrow the field assignments.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Names of the fields the patch sets, in submission order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consume the patch and return the field assignments.
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Map<String, Value>> for PersonPatch {
    type Error = PersonPatchError;

    fn try_from(value: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonPatch> for Map<String, Value> {
    fn from(value: PersonPatch) -> Self {
        value.0
    }
}
