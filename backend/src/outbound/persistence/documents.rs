//! Stored representation of person documents.
//!
//! The wire model keeps the identity as a hex string and the payload as a JSON
//! object; the stored model keeps them as a BSON ObjectId and an embedded
//! document. Field names are identical on both sides.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ports::PersonRepositoryError;
use crate::domain::{Person, PersonId, PersonPatch};
use crate::outbound::json_numbers::widen_unsigned;

/// Person document as stored in the collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct PersonDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Document>,
}

impl PersonDocument {
    /// Build an insertable document. The identity is left for the store.
    pub fn for_insert(person: &Person) -> Result<Self, PersonRepositoryError> {
        let data = person
            .data
            .clone()
            .map(|data| bson::to_document(&widen_unsigned(Value::Object(data))))
            .transpose()
            .map_err(|err| PersonRepositoryError::invalid_document(err.to_string()))?;
        Ok(Self {
            id: None,
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            username: person.username.clone(),
            email: person.email.clone(),
            data,
        })
    }

    /// Convert a fetched document back into the domain model.
    pub fn into_person(self) -> Result<Person, PersonRepositoryError> {
        let data = match self.data {
            None => None,
            Some(document) => match Bson::Document(document).into_relaxed_extjson() {
                Value::Object(map) => Some(map),
                other => {
                    return Err(PersonRepositoryError::query(format!(
                        "stored data is not an object: {other}"
                    )));
                }
            },
        };
        Ok(Person {
            id: self.id.map(PersonId::from_object_id),
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            email: self.email,
            data,
        })
    }
}

/// Encode a patch as the body of a `$set` operator.
pub(crate) fn set_document(patch: &PersonPatch) -> Result<Document, PersonRepositoryError> {
    patch
        .fields()
        .iter()
        .map(|(path, value)| {
            let encoded = bson::to_bson(&widen_unsigned(value.clone()))?;
            Ok((path.clone(), encoded))
        })
        .collect::<Result<Document, bson::ser::Error>>()
        .map_err(|err| PersonRepositoryError::invalid_document(err.to_string()))
}
