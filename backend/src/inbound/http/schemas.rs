//! OpenAPI schema definitions for domain types and envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use std::collections::HashMap;

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Person`].
///
/// Sparse person document; absent fields are omitted.
#[derive(ToSchema)]
#[schema(as = crate::domain::Person)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PersonSchema {
    /// Store-assigned identity, present once created.
    #[schema(rename = "_id", example = "5f1b0c2e9d3a4b5c6d7e8f90")]
    id: Option<String>,
    #[schema(example = "john")]
    first_name: Option<String>,
    #[schema(example = "doe")]
    last_name: Option<String>,
    #[schema(example = "john_doe")]
    username: Option<String>,
    #[schema(example = "john@example.com")]
    email: Option<String>,
    /// Free-form payload.
    #[schema(value_type = Option<Object>)]
    data: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::PersonPatch`].
///
/// Non-empty field to value mapping applied with `$set`. Dotted keys address
/// nested fields, for example `data.age`.
#[derive(ToSchema)]
#[schema(as = crate::domain::PersonPatch, value_type = HashMap<String, Object>)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PersonPatchSchema(HashMap<String, serde_json::Value>);

/// Envelope carrying one person.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PersonEnvelopeSchema {
    #[schema(example = 200)]
    status: u16,
    #[schema(example = "")]
    message: String,
    content: PersonSchema,
}

/// Envelope carrying one page of persons.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PersonListEnvelopeSchema {
    #[schema(example = 200)]
    status: u16,
    #[schema(example = "")]
    message: String,
    content: Vec<PersonSchema>,
}

/// Envelope echoing the applied patch.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PatchEnvelopeSchema {
    #[schema(example = 202)]
    status: u16,
    #[schema(example = "")]
    message: String,
    content: PersonPatchSchema,
}

/// Envelope for failed requests; `content` is always `null`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    #[schema(example = 404)]
    status: u16,
    #[schema(example = "person not found")]
    message: String,
    #[schema(value_type = Option<Object>)]
    content: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn properties(schema: RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn person_schema_exposes_underscore_id() {
        let fields = properties(PersonSchema::schema());
        assert!(fields.contains(&"_id".to_owned()), "{fields:?}");
        assert!(fields.contains(&"data".to_owned()), "{fields:?}");
    }

    #[test]
    fn envelope_schemas_share_shape() {
        for schema in [
            PersonEnvelopeSchema::schema(),
            PersonListEnvelopeSchema::schema(),
            PatchEnvelopeSchema::schema(),
            ErrorEnvelopeSchema::schema(),
        ] {
            let fields = properties(schema);
            assert_eq!(fields.len(), 3, "{fields:?}");
            for field in ["status", "message", "content"] {
                assert!(fields.contains(&field.to_owned()), "{fields:?}");
            }
        }
    }
}
