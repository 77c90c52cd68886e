//! Person resource model.
//!
//! A person is a sparse document: every field except the identity is optional
//! and absent fields are omitted from JSON rather than serialised as `null`.
//! The identity is assigned by the store on insert and is monotonically
//! increasing, so ordering by identity orders by creation time.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Stored field names shared by the wire format and the document store.
pub mod fields {
    /// Identity field.
    pub const ID: &str = "_id";
    /// Given name.
    pub const FIRST_NAME: &str = "first_name";
    /// Family name.
    pub const LAST_NAME: &str = "last_name";
    /// Login handle, part of the uniqueness constraint.
    pub const USERNAME: &str = "username";
    /// Contact address, part of the uniqueness constraint.
    pub const EMAIL: &str = "email";
    /// Free-form payload.
    pub const DATA: &str = "data";
}

/// Errors raised when parsing a [`PersonId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonIdError {
    /// The identifier was blank.
    #[error("person id must not be empty")]
    Empty,
    /// The identifier is not a 24 character hexadecimal token.
    #[error("person id must be a 24 character hex string, got {value:?}")]
    Malformed {
        /// Raw identifier supplied by the caller.
        value: String,
    },
}

/// Store-generated identity of a person document.
///
/// Serialises as the lowercase hexadecimal form of the underlying token.
///
/// # Examples
/// ```
/// use person_api::domain::PersonId;
///
/// let id = PersonId::parse("5f1b0c2e9d3a4b5c6d7e8f90").expect("valid id");
/// assert_eq!(id.to_string(), "5f1b0c2e9d3a4b5c6d7e8f90");
/// assert!(PersonId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonId(ObjectId);

impl PersonId {
    /// Parse an identity token from its hexadecimal form.
    ///
    /// # Errors
    /// Returns [`PersonIdError`] when `raw` is blank or not a valid token.
    pub fn parse(raw: &str) -> Result<Self, PersonIdError> {
        if raw.trim().is_empty() {
            return Err(PersonIdError::Empty);
        }
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| PersonIdError::Malformed {
                value: raw.to_owned(),
            })
    }

    /// Wrap a token issued by the store.
    #[must_use]
    pub const fn from_object_id(id: ObjectId) -> Self {
        Self(id)
    }

    /// Access the underlying store token.
    #[must_use]
    pub const fn as_object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl FromStr for PersonId {
    type Err = PersonIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PersonId {
    type Error = PersonIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PersonId> for String {
    fn from(value: PersonId) -> Self {
        value.to_string()
    }
}

/// A person document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Identity; `None` until the store assigns one.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PersonId>,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Login handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Open-ended key/value payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl Person {
    /// Return the document with its identity set.
    #[must_use]
    pub fn with_id(mut self, id: PersonId) -> Self {
        self.id = Some(id);
        self
    }
}
